// Throttling policy for the bulk loops. A plain value handed to the
// orchestrator and discovery; tests use `Pacing::zero()` so nothing
// actually sleeps.

use rand::Rng;
use std::thread;
use std::time::Duration;

/// Fixed pauses separating external calls, plus an optional random
/// jitter added on top of every pause. Not adaptive; server-side
/// rate-limit headers are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Between follow iterations.
    pub follow_interval: Duration,
    /// Between unfollow iterations.
    pub unfollow_interval: Duration,
    /// Between following-list page fetches.
    pub page_interval: Duration,
    /// Between search attempts in the initial discovery pass.
    pub search_interval: Duration,
    /// Between search attempts in the overflow pass.
    pub search_retry_interval: Duration,
    /// Upper bound of the random extra added to each pause.
    pub jitter: Duration,
}

impl Pacing {
    /// The intervals used against the live API.
    pub fn standard() -> Self {
        Pacing {
            follow_interval: Duration::from_millis(800),
            unfollow_interval: Duration::from_millis(600),
            page_interval: Duration::from_millis(200),
            search_interval: Duration::from_millis(150),
            search_retry_interval: Duration::from_millis(100),
            jitter: Duration::ZERO,
        }
    }

    /// No delays at all.
    pub fn zero() -> Self {
        Pacing {
            follow_interval: Duration::ZERO,
            unfollow_interval: Duration::ZERO,
            page_interval: Duration::ZERO,
            search_interval: Duration::ZERO,
            search_retry_interval: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Sleep for `interval` plus a random share of the jitter. A zero
    /// total is a no-op.
    pub fn pause(&self, interval: Duration) {
        let mut wait = interval;
        if !self.jitter.is_zero() {
            wait += self.jitter.mul_f64(rand::thread_rng().gen::<f64>());
        }
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
