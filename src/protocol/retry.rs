// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Retry budget and backoff for HTTP requests.

use std::time::Duration;

use rand::Rng;

/// Configuration for retrying failed requests.
///
/// Only server errors (5xx) and failures below the HTTP layer are retried.
/// The delay before retry `n` grows exponentially from `initial_delay`, is
/// capped at `max_delay`, and is then jittered.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use priceheat_lib::protocol::RetryPolicy;
///
/// // Default policy: 5 retries, 100ms doubling up to 5s
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 6);
///
/// // Never retry
/// let policy = RetryPolicy::none();
/// assert_eq!(policy.max_attempts(), 1);
///
/// // Custom policy
/// let policy = RetryPolicy::new()
///     .with_max_retries(3)
///     .with_initial_delay(Duration::from_millis(50))
///     .with_max_delay(Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for the delay between attempts.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Default number of retries after the first attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 5;
    /// Default delay before the first retry.
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);
    /// Default upper bound for the delay between attempts.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

    /// Creates a retry policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy that makes a single attempt.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between attempts.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Returns the total number of attempts, including the first one.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Calculates the un-jittered delay before retry number `retry`.
    ///
    /// Retry `0` waits `initial_delay`; each following retry multiplies it
    /// by `backoff_multiplier`, never exceeding `max_delay`.
    #[must_use]
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        if retry == 0 {
            return self.initial_delay.min(self.max_delay);
        }

        let multiplier = self
            .backoff_multiplier
            .powi(i32::try_from(retry).unwrap_or(i32::MAX));

        #[allow(clippy::cast_precision_loss)]
        let (delay_ms, max_ms) = (
            self.initial_delay.as_millis() as f64 * multiplier,
            self.max_delay.as_millis() as f64,
        );

        if !delay_ms.is_finite() || delay_ms >= max_ms {
            return self.max_delay;
        }

        // delay_ms is non-negative and below max_delay here
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay = Duration::from_millis(delay_ms as u64);

        delay.min(self.max_delay)
    }

    /// Draws the actual wait before retry number `retry`.
    ///
    /// The result is uniform in `[delay / 2, delay]` where `delay` is
    /// [`delay_for_attempt`](Self::delay_for_attempt).
    #[must_use]
    pub fn jittered_delay(&self, retry: u32) -> Duration {
        let delay = self.delay_for_attempt(retry);
        let floor = delay / 2;
        if floor >= delay {
            return delay;
        }
        rand::rng().random_range(floor..=delay)
    }

    /// Returns true if another attempt may follow `attempts_made` attempts.
    #[must_use]
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            backoff_multiplier: 2.0,
        }
    }
}
