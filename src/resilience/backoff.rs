//! Exponential backoff with jitter, bounded by a deadline.

use std::time::{Duration, Instant};

use rand::Rng;

/// Calculate exponential backoff delay with jitter.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // Apply jitter (0 to 10% of the delay)
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

/// Retry pacing for an operation that must give up at a fixed deadline.
#[derive(Debug, Clone)]
pub struct Deadline {
    deadline: Instant,
    attempt: u32,
    base_ms: u64,
    max_ms: u64,
}

impl Deadline {
    pub fn after(timeout: Duration, base_ms: u64, max_ms: u64) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            attempt: 0,
            base_ms,
            max_ms,
        }
    }

    /// Next delay to sleep before retrying, or `None` once the deadline passed.
    ///
    /// The delay never reaches past the deadline.
    pub fn next_delay(&mut self) -> Option<Duration> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return None;
        }
        self.attempt += 1;
        Some(calculate_backoff(self.attempt, self.base_ms, self.max_ms).min(remaining))
    }

    pub fn attempts(&self) -> u32 {
        self.attempt
    }
}
