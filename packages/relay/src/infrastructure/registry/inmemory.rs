//! InMemory ConnectionRegistry 実装
//!
//! A `HashMap` behind a `tokio::sync::RwLock`. Mutations take the write lock,
//! broadcasts copy a snapshot under the read lock and release it before sending,
//! so delivering to N peers is never serialized behind unrelated connections.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{ConnectionHandle, ConnectionId, ConnectionRegistry, RegistryError};

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, handle: ConnectionHandle) -> Result<(), RegistryError> {
        let mut connections = self.connections.write().await;
        if connections.contains_key(&handle.id) {
            return Err(RegistryError::AlreadyRegistered(handle.id.to_string()));
        }
        tracing::debug!("Connection '{}' registered", handle.id);
        connections.insert(handle.id, handle);
        Ok(())
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let removed = self.connections.write().await.remove(id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered", id);
        }
        removed
    }

    async fn snapshot(&self) -> Vec<ConnectionHandle> {
        self.connections.read().await.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        self.connections.read().await.len()
    }

    async fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.read().await.contains_key(id)
    }
}
