//! # Exponential Backoff
//!
//! Retry delay for issuers whose reconciliation keeps failing.
//! The delay doubles on every failure, starting at `min` and capped at `max`.
//!
//! ```rust
//! use aws_pca_issuer_controller::runtime::backoff::ExponentialBackoff;
//! use std::time::Duration;
//!
//! let mut backoff = ExponentialBackoff::new(Duration::from_secs(5), Duration::from_secs(30));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(5));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(10));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(20));
//! assert_eq!(backoff.next_backoff(), Duration::from_secs(30));
//! ```

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    min: Duration,
    max: Duration,
    current: Duration,
    error_count: u32,
}

impl ExponentialBackoff {
    /// `max` is raised to `min` when configured below it
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            current: min,
            error_count: 0,
        }
    }

    /// Current delay, then advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let result = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        self.error_count = self.error_count.saturating_add(1);
        result
    }

    /// Failures seen since the last reset
    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn reset(&mut self) {
        self.current = self.min;
        self.error_count = 0;
    }
}
