use std::time::Duration;

use async_trait::async_trait;

/// Delays between sync attempts and debounce windows.
///
/// Production sleeps on the tokio timer; tests record the requested delays.
#[async_trait]
pub trait SchedulerPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
