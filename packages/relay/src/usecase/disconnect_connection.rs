//! UseCase: 切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// 切断のユースケース
pub struct DisconnectConnectionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectConnectionUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Remove a connection from the registry.
    ///
    /// Idempotent: returns `false` if the connection was already gone (e.g. a
    /// broadcast dropped it first).
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        let removed = self.registry.unregister(id).await;
        if !removed {
            tracing::debug!("Connection '{}' was already removed", id);
        }
        removed
    }
}
