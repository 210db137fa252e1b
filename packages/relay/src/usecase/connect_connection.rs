//! UseCase: 接続処理
//!
//! ### 何をテストしているか
//! - ConnectConnectionUseCase::execute()
//! - アップグレード成功時にレジストリへ登録され、Open 状態の Connection が返ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 異常系：レジストリが登録を拒否した場合

use std::sync::Arc;

use engawa_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionHandle, ConnectionId, ConnectionRegistry, PusherChannel, Timestamp,
};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectConnectionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    clock: Arc<dyn Clock>,
}

impl ConnectConnectionUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Register a connection whose upgrade handshake just completed.
    ///
    /// # Arguments
    ///
    /// * `channel` - queue feeding the new connection's writer task
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - registered, in `Open` state
    /// * `Err(ConnectError)` - nothing was registered
    pub async fn execute(&self, channel: PusherChannel) -> Result<Connection, ConnectError> {
        let id = ConnectionId::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());
        let mut connection = Connection::connecting(id, connected_at);

        self.registry
            .register(ConnectionHandle::new(id, connected_at, channel))
            .await?;
        connection.mark_open()?;

        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        domain::{ConnectionState, MockConnectionRegistry, RegistryError},
        infrastructure::registry::InMemoryConnectionRegistry,
    };
    use engawa_shared::time::FixedClock;

    #[tokio::test]
    async fn test_connect_registers_open_connection() {
        // テスト項目: 接続が Open 状態で登録され、接続時刻が Clock から取られる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = ConnectConnectionUseCase::new(registry.clone(), Arc::new(FixedClock::new(42)));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(connection.state(), ConnectionState::Open);
        assert_eq!(connection.connected_at(), Timestamp::new(42));
        assert!(registry.contains(&connection.id()).await);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_each_connect_gets_a_distinct_id() {
        // テスト項目: 接続ごとに異なる ID が割り当てられる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = ConnectConnectionUseCase::new(registry.clone(), Arc::new(FixedClock::new(0)));
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let a = usecase.execute(tx1).await.unwrap();
        let b = usecase.execute(tx2).await.unwrap();

        // then (期待する結果):
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_connect_registry_rejection_is_reported() {
        // テスト項目: レジストリが登録を拒否した場合 ConnectError が返される
        // given (前提条件):
        let mut registry = MockConnectionRegistry::new();
        registry
            .expect_register()
            .times(1)
            .returning(|handle| Err(RegistryError::AlreadyRegistered(handle.id.to_string())));
        let usecase = ConnectConnectionUseCase::new(Arc::new(registry), Arc::new(FixedClock::new(0)));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(tx).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ConnectError::Registry(RegistryError::AlreadyRegistered(_)))
        ));
    }
}
