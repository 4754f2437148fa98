//! Client-side spacing between API calls.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Sleep until at least `interval` has passed since `start`.
pub async fn throttle(start: Instant, interval: Duration) {
    let wait = interval.saturating_sub(start.elapsed());
    if !wait.is_zero() {
        debug!(wait_ms = wait.as_millis() as u64, "throttling");
        sleep(wait).await;
    }
}

/// Keeps successive calls to [`Throttle::wait`] at least `interval` apart.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Wait out the rest of the interval, then mark the start of a new call.
    /// The first call returns immediately.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            throttle(last, self.interval).await;
        }
        self.last = Some(Instant::now());
    }
}
