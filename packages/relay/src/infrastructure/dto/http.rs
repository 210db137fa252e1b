//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use engawa_shared::time::timestamp_to_rfc3339;

use crate::domain::ConnectionHandle;

/// One registered connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSummaryDto {
    pub id: String,
    /// RFC 3339, UTC
    pub connected_at: String,
}

/// Response of `GET /api/connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionListDto {
    pub count: usize,
    pub connections: Vec<ConnectionSummaryDto>,
}

impl From<&ConnectionHandle> for ConnectionSummaryDto {
    fn from(handle: &ConnectionHandle) -> Self {
        Self {
            id: handle.id.to_string(),
            connected_at: timestamp_to_rfc3339(handle.connected_at.value()),
        }
    }
}

impl From<&[ConnectionHandle]> for ConnectionListDto {
    fn from(handles: &[ConnectionHandle]) -> Self {
        Self {
            count: handles.len(),
            connections: handles.iter().map(ConnectionSummaryDto::from).collect(),
        }
    }
}
