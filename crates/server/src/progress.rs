//! Progress forwarding to the MCP client.
//!
//! Progress messages go to the tracing log and, unless the client raised its
//! log level above `info`, to the client as `notifications/message`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mcp_edgar_client::ProgressSink;
use rmcp::{
    model::{LoggingLevel, LoggingMessageNotificationParam},
    service::{Peer, RoleServer},
};

/// Whether info-level messages should reach the client.
pub fn forwards_info(level: LoggingLevel) -> bool {
    matches!(level, LoggingLevel::Debug | LoggingLevel::Info)
}

/// Sink that sends progress to the calling client.
pub struct PeerProgress {
    peer: Peer<RoleServer>,
    logger: &'static str,
    enabled: Arc<AtomicBool>,
}

impl PeerProgress {
    pub fn new(peer: Peer<RoleServer>, logger: &'static str, enabled: Arc<AtomicBool>) -> Self {
        Self { peer, logger, enabled }
    }
}

#[async_trait::async_trait]
impl ProgressSink for PeerProgress {
    async fn notify(&self, message: &str) {
        tracing::info!(logger = self.logger, "{message}");

        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }

        let param = LoggingMessageNotificationParam {
            level: LoggingLevel::Info,
            logger: Some(self.logger.to_string()),
            data: serde_json::Value::String(message.to_string()),
        };

        if let Err(e) = self.peer.notify_logging_message(param).await {
            tracing::debug!("failed to forward progress to client: {e}");
        }
    }
}
