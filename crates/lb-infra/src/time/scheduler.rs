use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use lb_core::ports::SchedulerPort;

/// Scheduler on the tokio timer.
pub struct TokioScheduler;

#[async_trait]
impl SchedulerPort for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        sleep(duration).await;
    }
}
