// Retry policy - runtime-mutable attempt budget for polling operations
//
// Each list carries an Arc<RetryPolicy> handed to it at construction. The
// values are read fresh on every loop iteration, so a test can tighten or
// loosen the budget mid-run and in-flight polls pick the change up.

use parking_lot::RwLock;
use std::time::Duration;

/// Default number of poll attempts before a lookup/assertion gives up
pub const DEFAULT_RETRY_AMOUNT: u32 = 5;

/// Default sleep between poll attempts
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
struct RetrySettings {
    amount: u32,
    interval: Duration,
}

/// Attempt budget governing every retry-driven list operation.
///
/// Not a timeout: the ceiling is `retry_amount() x retry_interval()` plus
/// whatever the backend round-trips cost. There is no backoff curve.
#[derive(Debug)]
pub struct RetryPolicy {
    inner: RwLock<RetrySettings>,
}

impl RetryPolicy {
    /// Creates a policy with an explicit budget.
    pub fn new(amount: u32, interval: Duration) -> Self {
        Self {
            inner: RwLock::new(RetrySettings { amount, interval }),
        }
    }

    /// Number of attempts before the budget is exhausted.
    pub fn retry_amount(&self) -> u32 {
        self.inner.read().amount
    }

    /// Sleep between attempts.
    pub fn retry_interval(&self) -> Duration {
        self.inner.read().interval
    }

    /// Replaces the attempt count. Polls already in flight see the new value
    /// on their next iteration.
    pub fn set_retry_amount(&self, amount: u32) {
        self.inner.write().amount = amount;
    }

    /// Replaces the sleep interval. Polls already in flight see the new value
    /// on their next iteration.
    pub fn set_retry_interval(&self, interval: Duration) {
        self.inner.write().interval = interval;
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_AMOUNT, DEFAULT_RETRY_INTERVAL)
    }
}
