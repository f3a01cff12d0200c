//! Retry policy — bounded exponential backoff per attempt.

use std::time::Duration;

/// Backoff schedule applied when an attempt fails with a retryable error.
///
/// Delay for retry `n` (0-based) is `base_delay × 2^n`, capped at
/// `max_delay`. When the provider supplies its own wait hint (model
/// cold-start, `Retry-After`), the hint replaces the base.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Tries per attempt before moving to the next one.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        RetryPolicy {
            max_retries: max_retries.clamp(1, 5),
            base_delay,
            max_delay,
        }
    }

    /// Backoff before retry number `attempt` (0-based), optionally scaled
    /// from a provider hint instead of the policy base.
    pub fn backoff(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        let base = hint.unwrap_or(self.base_delay);
        let factor = 2u32.saturating_pow(attempt);
        base.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}
