//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::MessageFormatter};

/// Run one client session until the relay closes the connection or stdin ends.
///
/// # Arguments
///
/// * `url` - relay URL, e.g. `ws://127.0.0.1:4000`
/// * `name` - label used in the greeting and in printed output
/// * `greet` - send a JSON greeting as soon as the connection opens
pub async fn run_client_session(url: &str, name: &str, greet: bool) -> Result<(), ClientError> {
    let (ws_stream, _response) =
        connect_async(url)
            .await
            .map_err(|e| ClientError::Connect {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

    tracing::info!("{} connected to relay at {}", name, url);

    let (mut write, mut read) = ws_stream.split();

    if greet {
        write
            .send(Message::text(MessageFormatter::greeting(name)))
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
    }

    // Spawn a task to handle incoming messages
    let name_for_read = name.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    println!(
                        "{}",
                        MessageFormatter::format_text_message(&name_for_read, text.as_str())
                    );
                }
                Ok(Message::Binary(data)) => {
                    println!(
                        "{}",
                        MessageFormatter::format_binary_message(&name_for_read, data.len())
                    );
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("{} disconnected", name_for_read);
                    return Ok(());
                }
                Err(e) => {
                    return Err(ClientError::Connection(e.to_string()));
                }
                _ => {}
            }
        }
        Ok(())
    });

    // Spawn a task to send stdin lines as raw text frames
    let mut write_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            write
                .send(Message::text(line.to_string()))
                .await
                .map_err(|e| ClientError::Connection(e.to_string()))?;
        }
        // stdin closed: keep listening until the relay goes away
        std::future::pending::<Result<(), ClientError>>().await
    });

    // If any one of the tasks completes, abort the other
    let result = tokio::select! {
        result = &mut read_task => {
            write_task.abort();
            result
        }
        result = &mut write_task => {
            read_task.abort();
            result
        }
    };

    result.map_err(|e| ClientError::Connection(e.to_string()))?
}
