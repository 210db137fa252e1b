//! Message formatting utilities for client display.

use serde_json::Value;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// The greeting sent right after connecting
    pub fn greeting(name: &str) -> String {
        serde_json::json!({
            "type": "message",
            "content": format!("Hello from {}!", name),
        })
        .to_string()
    }

    /// Format a received text frame.
    ///
    /// JSON payloads are shown compactly re-serialized; anything else is shown as is.
    pub fn format_text_message(name: &str, text: &str) -> String {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => format!("{} received: {}", name, value),
            Err(_) => format!("{} received (raw): {}", name, text),
        }
    }

    /// Format a received binary frame
    pub fn format_binary_message(name: &str, len: usize) -> String {
        format!("{} received {} bytes of binary data", name, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_is_json_message() {
        // テスト項目: 挨拶メッセージが type/content を持つ JSON になる
        // given (前提条件):
        let name = "Client 1";

        // when (操作):
        let greeting = MessageFormatter::greeting(name);

        // then (期待する結果):
        let value: Value = serde_json::from_str(&greeting).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["content"], "Hello from Client 1!");
    }

    #[test]
    fn test_format_json_message() {
        // テスト項目: JSON のメッセージは解析されて表示される
        // given (前提条件):
        let text = r#"{ "type": "message", "content": "hi" }"#;

        // when (操作):
        let result = MessageFormatter::format_text_message("alice", text);

        // then (期待する結果):
        assert_eq!(
            result,
            r#"alice received: {"content":"hi","type":"message"}"#
        );
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: JSON でないメッセージはそのまま表示される
        // given (前提条件):
        let text = "ping";

        // when (操作):
        let result = MessageFormatter::format_text_message("bob", text);

        // then (期待する結果):
        assert_eq!(result, "bob received (raw): ping");
    }

    #[test]
    fn test_format_binary_message() {
        // テスト項目: バイナリメッセージはバイト数が表示される
        // given (前提条件):

        // when (操作):
        let result = MessageFormatter::format_binary_message("bob", 4);

        // then (期待する結果):
        assert_eq!(result, "bob received 4 bytes of binary data");
    }
}
