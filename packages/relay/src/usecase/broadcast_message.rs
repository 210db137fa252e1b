//! UseCase: メッセージのブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute()
//! - 配信ポリシー（送信者を含む / 含まない）
//! - 受信者ごとの送信失敗が他の受信者への配信を止めないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 接続へのブロードキャスト
//! - 異常系：一部の受信者のキューが既に閉じている
//! - エッジケース：送信者だけが接続している / 送信者が既に切断済み

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, DeliveryPolicy, OutboundFrame, Payload};

/// Outcome of one broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the payload was queued for
    pub delivered: Vec<ConnectionId>,
    /// Connections whose queue was gone; they were removed from the registry
    pub dropped: Vec<ConnectionId>,
}

/// ブロードキャストのユースケース
pub struct BroadcastMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    policy: DeliveryPolicy,
}

impl BroadcastMessageUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, policy: DeliveryPolicy) -> Self {
        Self { registry, policy }
    }

    /// Forward `payload` from `sender` to the registered connections.
    ///
    /// Works on a snapshot of the registry. A recipient whose queue has closed is
    /// treated as disconnected and removed; the remaining recipients are still
    /// served. Nothing is reported back to the sender.
    pub async fn execute(&self, sender: &ConnectionId, payload: Payload) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for recipient in self.registry.snapshot().await {
            if !self.policy.should_deliver(sender, &recipient.id) {
                continue;
            }

            match recipient.send(OutboundFrame::Payload(payload.clone())) {
                Ok(()) => {
                    tracing::debug!("Queued message from '{}' for '{}'", sender, recipient.id);
                    report.delivered.push(recipient.id);
                }
                Err(e) => {
                    tracing::warn!("{}; dropping it from the registry", e);
                    self.registry.unregister(&recipient.id).await;
                    report.dropped.push(recipient.id);
                }
            }
        }

        report
    }
}
