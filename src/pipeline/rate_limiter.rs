use std::time::Duration;

use async_trait::async_trait;

use crate::app::ports::RateLimiterPort;

/// Sleeps for a fixed interval after each external call.
///
/// This is not a token bucket. The delay is applied unconditionally so that
/// lookups, hits and misses alike, are spaced at least `delay` apart.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RateLimiterPort for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
