use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Spaces out Airtable calls. Exceeding the published rate limit locks
/// the API down for 30 seconds, so every request waits its turn here.
/// The lock is held across the sleep, which also serializes concurrent
/// callers.
pub struct RequestPacer {
    min_interval: Duration,
    next_allowed: Mutex<Instant>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_allowed: Mutex::new(Instant::now()),
        }
    }

    /// Waits until the next request slot opens and claims it.
    pub async fn wait_turn(&self) {
        let mut next_allowed = self.next_allowed.lock().await;
        sleep_until(*next_allowed).await;
        *next_allowed = Instant::now() + self.min_interval;
    }
}
