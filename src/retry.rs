//! Retry and backoff policy for transient failures.
//!
//! A logical call may span several attempts. [`RetryPolicy`] decides, after
//! each failed attempt, whether another one is allowed and how long to wait
//! first. [`RetryState`] tracks one logical call and is dropped with it.

use crate::rate_limit::RateLimitConfig;
use crate::ClientError;
use rand::Rng;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(200);

/// Default cap on any single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

/// The shape of the wait between attempts.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::Backoff;
/// use std::time::Duration;
///
/// // 100ms, 200ms, 400ms, 800ms... capped at 2s
/// let exponential = Backoff::Exponential {
///     initial_delay: Duration::from_millis(100),
///     max_delay: Duration::from_secs(2),
///     jitter: false,
/// };
/// assert_eq!(exponential.delay_for_retry(3), Duration::from_millis(400));
///
/// let fixed = Backoff::Fixed { delay: Duration::from_millis(50) };
/// assert_eq!(fixed.delay_for_retry(7), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// `initial_delay * 2^(retry - 1)`, capped at `max_delay`.
    ///
    /// With `jitter`, each delay is scaled by a random factor in
    /// `[0.75, 1.25]` and capped again.
    Exponential {
        /// Delay before the first retry.
        initial_delay: Duration,
        /// Upper bound for any delay.
        max_delay: Duration,
        /// Whether to randomize delays.
        jitter: bool,
    },

    /// The same delay before every retry.
    Fixed {
        /// The delay.
        delay: Duration,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Exponential {
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            jitter: true,
        }
    }
}

impl Backoff {
    /// Returns the delay before the given retry (1 = first retry).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        match self {
            Backoff::Exponential {
                initial_delay,
                max_delay,
                jitter,
            } => {
                let multiplier = 2u32.saturating_pow(retry.saturating_sub(1));
                let delay = initial_delay.saturating_mul(multiplier).min(*max_delay);
                if !*jitter {
                    return delay;
                }

                let factor: f64 = rand::thread_rng().gen_range(0.75..=1.25);
                Duration::try_from_secs_f64(delay.as_secs_f64() * factor)
                    .map_or(*max_delay, |jittered| jittered.min(*max_delay))
            }
            Backoff::Fixed { delay } => *delay,
        }
    }
}

/// Per-call retry bookkeeping.
///
/// `attempt` counts attempts issued so far, so it is `1` while the first
/// attempt is in flight and never exceeds `max_retries + 1`.
#[derive(Debug, Default)]
pub struct RetryState {
    attempt: u32,
    last_error: Option<ClientError>,
    last_delay: Duration,
}

impl RetryState {
    /// Creates the state for a fresh logical call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attempts issued so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// The error that triggered the most recent retry.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// The most recent backoff delay.
    pub fn last_delay(&self) -> Duration {
        self.last_delay
    }

    pub(crate) fn begin_attempt(&mut self) -> u32 {
        self.attempt += 1;
        self.attempt
    }

    pub(crate) fn record_retry(&mut self, error: ClientError, delay: Duration) {
        self.last_error = Some(error);
        self.last_delay = delay;
    }
}

/// Decides whether and when a failed attempt is re-issued.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::{Backoff, ClientError, RetryPolicy};
/// use zsxq_sdk::rate_limit::RateLimitConfig;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(
///     2,
///     Backoff::Fixed { delay: Duration::from_millis(10) },
///     RateLimitConfig::default(),
/// );
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: Backoff,
    rate_limit: RateLimitConfig,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_RETRIES,
            Backoff::default(),
            RateLimitConfig::default(),
        )
    }
}

impl RetryPolicy {
    /// Creates a policy allowing `max_retries` retries after the first attempt.
    pub fn new(max_retries: u32, backoff: Backoff, rate_limit: RateLimitConfig) -> Self {
        Self {
            max_retries,
            backoff,
            rate_limit,
        }
    }

    /// Maximum retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Maximum attempts for one logical call.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// The backoff curve.
    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// The rate limit handling.
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.rate_limit
    }

    /// Returns the wait before the next attempt, or `None` if `error` must
    /// be surfaced.
    ///
    /// `state` describes the attempt that just failed. Delays never shrink
    /// within one logical call.
    pub fn next_delay(&self, error: &ClientError, state: &RetryState) -> Option<Duration> {
        if !error.is_retryable() {
            return None;
        }

        let retries_used = state.attempt().saturating_sub(1);
        if retries_used >= self.max_retries {
            return None;
        }

        let mut delay = self.backoff.delay_for_retry(retries_used + 1);
        if self.rate_limit.enabled {
            if let Some(advised) = error.rate_limit_delay(self.rate_limit.max_wait) {
                delay = delay.max(advised);
            }
        }

        Some(delay.max(state.last_delay()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::RateLimitInfo;
    use http::StatusCode;

    fn server_error() -> ClientError {
        ClientError::Server {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "busy".to_string(),
        }
    }

    fn state_after(attempts: u32) -> RetryState {
        let mut state = RetryState::new();
        for _ in 0..attempts {
            state.begin_attempt();
        }
        state
    }

    #[test]
    fn test_exponential_delays() {
        let backoff = Backoff::Exponential {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            jitter: false,
        };

        assert_eq!(backoff.delay_for_retry(1), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_retry(2), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_retry(3), Duration::from_millis(400));
        assert_eq!(backoff.delay_for_retry(4), Duration::from_millis(800));
        assert_eq!(backoff.delay_for_retry(5), Duration::from_secs(1));
        assert_eq!(backoff.delay_for_retry(40), Duration::from_secs(1));
    }

    #[test]
    fn test_jitter_stays_in_band() {
        let backoff = Backoff::Exponential {
            initial_delay: Duration::from_millis(400),
            max_delay: Duration::from_secs(10),
            jitter: true,
        };

        for _ in 0..100 {
            let delay = backoff.delay_for_retry(1);
            assert!(delay >= Duration::from_millis(300), "{:?}", delay);
            assert!(delay <= Duration::from_millis(500), "{:?}", delay);
        }
    }

    #[test]
    fn test_jitter_near_duration_max() {
        let backoff = Backoff::Exponential {
            initial_delay: Duration::MAX,
            max_delay: Duration::MAX,
            jitter: true,
        };

        for retry in 1..50 {
            let delay = backoff.delay_for_retry(retry);
            assert!(delay >= Duration::from_secs(u64::MAX / 2), "{:?}", delay);
        }
    }

    #[test]
    fn test_policy_stops_after_max_retries() {
        let policy = RetryPolicy::new(
            2,
            Backoff::Fixed {
                delay: Duration::from_millis(10),
            },
            RateLimitConfig::default(),
        );
        let error = server_error();

        assert!(policy.next_delay(&error, &state_after(1)).is_some());
        assert!(policy.next_delay(&error, &state_after(2)).is_some());
        assert_eq!(policy.next_delay(&error, &state_after(3)), None);
    }

    #[test]
    fn test_zero_retries_means_single_attempt() {
        let policy = RetryPolicy::new(0, Backoff::default(), RateLimitConfig::default());
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.next_delay(&server_error(), &state_after(1)), None);
    }

    #[test]
    fn test_terminal_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        let error = ClientError::Api {
            code: 1004,
            message: "gone".to_string(),
        };
        assert_eq!(policy.next_delay(&error, &state_after(1)), None);
    }

    #[test]
    fn test_delays_never_shrink() {
        let policy = RetryPolicy::new(
            5,
            Backoff::Fixed {
                delay: Duration::from_millis(10),
            },
            RateLimitConfig::default(),
        );
        let mut state = state_after(1);
        state.record_retry(server_error(), Duration::from_millis(80));
        state.begin_attempt();

        assert_eq!(
            policy.next_delay(&server_error(), &state),
            Some(Duration::from_millis(80))
        );
    }

    #[test]
    fn test_state_remembers_last_retry() {
        let mut state = RetryState::new();
        assert!(state.last_error().is_none());
        assert_eq!(state.last_delay(), Duration::ZERO);

        assert_eq!(state.begin_attempt(), 1);
        state.record_retry(server_error(), Duration::from_millis(40));

        let last = state.last_error().unwrap();
        assert_eq!(last.kind(), crate::ErrorKind::Server);
        assert_eq!(last.message(), "busy");
        assert_eq!(state.last_delay(), Duration::from_millis(40));
        assert_eq!(state.attempt(), 1);
    }

    #[test]
    fn test_rate_limit_hint_extends_delay() {
        let error = ClientError::RateLimit {
            status: Some(StatusCode::TOO_MANY_REQUESTS),
            code: None,
            message: "slow down".to_string(),
            rate_limit_info: Some(RateLimitInfo {
                retry_after: Some(Duration::from_secs(2)),
                ..Default::default()
            }),
        };
        let backoff = Backoff::Fixed {
            delay: Duration::from_millis(10),
        };

        let honored = RetryPolicy::new(3, backoff.clone(), RateLimitConfig::default());
        assert_eq!(
            honored.next_delay(&error, &state_after(1)),
            Some(Duration::from_secs(2))
        );

        let ignored = RetryPolicy::new(3, backoff, RateLimitConfig::disabled());
        assert_eq!(
            ignored.next_delay(&error, &state_after(1)),
            Some(Duration::from_millis(10))
        );
    }
}
