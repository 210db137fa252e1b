//! Server execution logic.

use std::{collections::HashSet, io, net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower_http::trace::TraceLayer;

use engawa_shared::time::{Clock, SystemClock};

use crate::{
    config::HubConfig,
    domain::{ConnectionRegistry, OutboundFrame},
    infrastructure::registry::InMemoryConnectionRegistry,
    usecase::{
        BroadcastMessageUseCase, ConnectConnectionUseCase, DisconnectConnectionUseCase,
        ListConnectionsUseCase,
    },
};

use super::{
    error::BindError,
    handler::{health_check, list_connections, websocket_handler},
    state::AppState,
};

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// WebSocket broadcast hub
///
/// Owns its connection registry, so several hubs can run side by side.
///
/// # Example
///
/// ```ignore
/// let handle = Hub::new(HubConfig::default()).start().await?;
/// shutdown_signal().await;
/// handle.shutdown().await;
/// ```
pub struct Hub {
    config: HubConfig,
    registry: Arc<dyn ConnectionRegistry>,
    clock: Arc<dyn Clock>,
}

impl Hub {
    /// Create a hub backed by an in-memory registry and the system clock
    pub fn new(config: HubConfig) -> Self {
        Self::with_registry(
            config,
            Arc::new(InMemoryConnectionRegistry::new()),
            Arc::new(SystemClock),
        )
    }

    pub fn with_registry(
        config: HubConfig,
        registry: Arc<dyn ConnectionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            registry,
            clock,
        }
    }

    /// Build the router: WebSocket upgrades on `/` and `/ws`, plus the HTTP API
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_usecase: ConnectConnectionUseCase::new(
                self.registry.clone(),
                self.clock.clone(),
            ),
            broadcast_usecase: BroadcastMessageUseCase::new(
                self.registry.clone(),
                self.config.delivery_policy(),
            ),
            disconnect_usecase: DisconnectConnectionUseCase::new(self.registry.clone()),
            list_connections_usecase: ListConnectionsUseCase::new(self.registry.clone()),
            send_timeout: self.config.send_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/connections", get(list_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind the listening socket and start accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] if the address cannot be bound (in use, no
    /// permission, unresolvable host). Nothing is left listening in that case.
    pub async fn start(self) -> Result<HubHandle, BindError> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| BindError {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| BindError {
            addr: addr.clone(),
            source,
        })?;

        tracing::info!("WebSocket relay listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}", local_addr);
        tracing::info!("Delivery policy: {:?}", self.config.delivery_policy());

        let app = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(HubHandle {
            local_addr,
            registry: self.registry,
            shutdown_tx,
            server,
            shutdown_timeout: self.config.shutdown_timeout,
        })
    }
}

/// A running hub
pub struct HubHandle {
    local_addr: SocketAddr,
    registry: Arc<dyn ConnectionRegistry>,
    shutdown_tx: oneshot::Sender<()>,
    server: JoinHandle<io::Result<()>>,
    shutdown_timeout: Duration,
}

impl HubHandle {
    /// Address actually bound (useful with port `0`)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.local_addr)
    }

    pub fn registry(&self) -> Arc<dyn ConnectionRegistry> {
        self.registry.clone()
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.count().await
    }

    /// Graceful shutdown.
    ///
    /// 1. stop accepting new connections
    /// 2. send a close frame to every registered connection
    /// 3. wait, at most `shutdown_timeout`, for the connections to drain
    pub async fn shutdown(self) {
        let HubHandle {
            registry,
            shutdown_tx,
            mut server,
            shutdown_timeout,
            ..
        } = self;

        let _ = shutdown_tx.send(());
        tracing::info!("Closing {} connection(s)", registry.count().await);

        let drained = tokio::time::timeout(shutdown_timeout, async {
            close_and_drain(registry.as_ref()).await;
            (&mut server).await
        })
        .await;

        match drained {
            Ok(Ok(Ok(()))) => tracing::info!("Relay shutdown complete"),
            Ok(Ok(Err(e))) => tracing::error!("Relay server error: {}", e),
            Ok(Err(e)) => tracing::error!("Relay server task failed: {}", e),
            Err(_) => {
                tracing::warn!(
                    "Shutdown timed out after {:?} with {} connection(s) still open",
                    shutdown_timeout,
                    registry.count().await
                );
                server.abort();
            }
        }
    }
}

/// Send a close frame to every registered connection and wait until the
/// registry is empty.
///
/// Connections whose upgrade finishes after the first pass still register, so
/// every poll re-reads the registry and closes ids it has not seen yet.
async fn close_and_drain(registry: &dyn ConnectionRegistry) {
    let mut closed = HashSet::new();
    loop {
        for connection in registry.snapshot().await {
            if closed.insert(connection.id)
                && let Err(e) = connection.send(OutboundFrame::Close)
            {
                tracing::debug!("{}", e);
            }
        }
        if registry.count().await == 0 {
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
