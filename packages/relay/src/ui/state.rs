//! Shared application state.

use std::time::Duration;

use crate::usecase::{
    BroadcastMessageUseCase, ConnectConnectionUseCase, DisconnectConnectionUseCase,
    ListConnectionsUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectConnectionUseCase（接続のユースケース）
    pub connect_usecase: ConnectConnectionUseCase,
    /// BroadcastMessageUseCase（ブロードキャストのユースケース）
    pub broadcast_usecase: BroadcastMessageUseCase,
    /// DisconnectConnectionUseCase（切断のユースケース）
    pub disconnect_usecase: DisconnectConnectionUseCase,
    /// ListConnectionsUseCase（接続一覧取得のユースケース）
    pub list_connections_usecase: ListConnectionsUseCase,
    /// Upper bound for one socket write
    pub send_timeout: Duration,
}
