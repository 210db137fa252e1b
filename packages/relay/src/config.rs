//! Hub configuration.

use std::time::Duration;

use crate::domain::DeliveryPolicy;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime settings of a [`Hub`](crate::Hub)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to; `0` picks a free port
    pub port: u16,
    /// Whether a sender receives its own messages back
    pub include_sender: bool,
    /// Upper bound for one socket write before the peer is considered gone
    pub send_timeout: Duration,
    /// Upper bound for draining connections on shutdown
    pub shutdown_timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            include_sender: true,
            send_timeout: DEFAULT_SEND_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl HubConfig {
    /// `host:port`, with IPv6 literals bracketed
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy::from_include_sender(self.include_sender)
    }
}
