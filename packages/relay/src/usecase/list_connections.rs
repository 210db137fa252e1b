//! UseCase: 接続一覧の取得

use std::sync::Arc;

use crate::domain::{ConnectionHandle, ConnectionRegistry};

/// 接続一覧取得のユースケース
pub struct ListConnectionsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ListConnectionsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Registered connections, oldest first (ties broken by id)
    pub async fn execute(&self) -> Vec<ConnectionHandle> {
        let mut connections = self.registry.snapshot().await;
        connections.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        connections
    }
}
