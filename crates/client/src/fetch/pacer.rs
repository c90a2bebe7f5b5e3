//! Outbound request pacing.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a minimum interval between consecutive requests.
///
/// The lock is held across the wait, so concurrent callers queue up and leave
/// one interval apart.
#[derive(Debug)]
pub struct RequestPacer {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self { last_request: Mutex::new(None), min_interval }
    }

    /// Wait until a request may be issued, then record it.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
