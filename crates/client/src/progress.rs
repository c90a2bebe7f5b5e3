//! Progress notifications emitted while a filing is retrieved.

/// Receiver for human-readable progress messages.
#[async_trait::async_trait]
pub trait ProgressSink: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Sink that only writes to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

#[async_trait::async_trait]
impl ProgressSink for TracingProgress {
    async fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Sink collecting messages in memory.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingProgress {
    messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait::async_trait]
impl ProgressSink for RecordingProgress {
    async fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
