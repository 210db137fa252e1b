//! Relayed payloads and the delivery policy.

use tokio::sync::mpsc;

use super::ConnectionId;

/// An opaque message received from a peer.
///
/// The hub never inspects or rewrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    /// Size in bytes
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Binary(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the hub queues for a connection's writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Forward a payload to the peer
    Payload(Payload),
    /// Send a close frame and stop writing
    Close,
}

/// Queue feeding one connection's writer task
pub type PusherChannel = mpsc::UnboundedSender<OutboundFrame>;

/// Whether the sender of a message gets its own copy back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Every registered connection, sender included
    #[default]
    IncludeSender,
    /// Every registered connection except the sender
    ExcludeSender,
}

impl DeliveryPolicy {
    pub fn from_include_sender(include_sender: bool) -> Self {
        if include_sender {
            DeliveryPolicy::IncludeSender
        } else {
            DeliveryPolicy::ExcludeSender
        }
    }

    /// Should a message from `sender` be delivered to `recipient`?
    pub fn should_deliver(&self, sender: &ConnectionId, recipient: &ConnectionId) -> bool {
        match self {
            DeliveryPolicy::IncludeSender => true,
            DeliveryPolicy::ExcludeSender => sender != recipient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_len() {
        // テスト項目: テキスト/バイナリ両方でバイト長が返される
        // given (前提条件):
        let text = Payload::Text("こんにちは".to_string());
        let binary = Payload::Binary(vec![1, 2, 3]);

        // when (操作):

        // then (期待する結果):
        assert_eq!(text.len(), 15);
        assert_eq!(binary.len(), 3);
        assert!(Payload::Text(String::new()).is_empty());
    }

    #[test]
    fn test_include_sender_delivers_to_everyone() {
        // テスト項目: IncludeSender では送信者自身にも配信される
        // given (前提条件):
        let policy = DeliveryPolicy::IncludeSender;
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();

        // when (操作):

        // then (期待する結果):
        assert!(policy.should_deliver(&alice, &alice));
        assert!(policy.should_deliver(&alice, &bob));
    }

    #[test]
    fn test_exclude_sender_skips_only_the_sender() {
        // テスト項目: ExcludeSender では送信者以外にのみ配信される
        // given (前提条件):
        let policy = DeliveryPolicy::ExcludeSender;
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();

        // when (操作):

        // then (期待する結果):
        assert!(!policy.should_deliver(&alice, &alice));
        assert!(policy.should_deliver(&alice, &bob));
    }

    #[test]
    fn test_policy_from_flag() {
        // テスト項目: フラグから正しいポリシーが生成される（デフォルトは送信者を含む）
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert_eq!(
            DeliveryPolicy::from_include_sender(true),
            DeliveryPolicy::IncludeSender
        );
        assert_eq!(
            DeliveryPolicy::from_include_sender(false),
            DeliveryPolicy::ExcludeSender
        );
        assert_eq!(DeliveryPolicy::default(), DeliveryPolicy::IncludeSender);
    }
}
