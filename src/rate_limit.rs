//! Rate limit hints carried by HTTP 429 responses.
//!
//! When the platform throttles a caller it may say how long to wait, either
//! with `Retry-After` or with an `X-RateLimit-Reset` timestamp. The retry
//! policy prefers those hints over its own backoff curve.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default upper bound on a server-advised wait.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);

/// Wait hints parsed from a throttled response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// From `Retry-After` (delay-seconds or HTTP-date).
    pub retry_after: Option<Duration>,

    /// From `X-RateLimit-Reset` or `RateLimit-Reset` (Unix seconds).
    pub reset_at: Option<SystemTime>,

    /// From `X-RateLimit-Remaining`.
    pub remaining: Option<u64>,
}

impl RateLimitInfo {
    /// Parses the known rate limit headers.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsxq_sdk::rate_limit::RateLimitInfo;
    /// use http::HeaderMap;
    /// use std::time::Duration;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("retry-after", "3".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers);
    /// assert_eq!(info.retry_after, Some(Duration::from_secs(3)));
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let reset_at = header_u64(headers, "x-ratelimit-reset")
            .or_else(|| header_u64(headers, "ratelimit-reset"))
            .and_then(|secs| UNIX_EPOCH.checked_add(Duration::from_secs(secs)));

        Self {
            retry_after: parse_retry_after(headers),
            reset_at,
            remaining: header_u64(headers, "x-ratelimit-remaining"),
        }
    }

    /// Returns `true` if no hint was present at all.
    pub fn is_empty(&self) -> bool {
        self.retry_after.is_none() && self.reset_at.is_none() && self.remaining.is_none()
    }

    /// Returns the advised wait, capped by `max_wait`.
    ///
    /// `Retry-After` wins over the reset timestamp. A reset time already in
    /// the past yields `None`.
    pub fn delay(&self, max_wait: Duration) -> Option<Duration> {
        if let Some(retry_after) = self.retry_after {
            return Some(retry_after.min(max_wait));
        }

        self.reset_at
            .and_then(|reset_at| reset_at.duration_since(SystemTime::now()).ok())
            .map(|until_reset| until_reset.min(max_wait))
    }
}

/// How the retry policy treats rate limit hints.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::rate_limit::RateLimitConfig;
/// use std::time::Duration;
///
/// let config = RateLimitConfig {
///     max_wait: Duration::from_secs(10),
///     ..RateLimitConfig::default()
/// };
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Whether server-advised waits are honored.
    pub enabled: bool,

    /// Longest server-advised wait that will be honored.
    pub max_wait: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl RateLimitConfig {
    /// Ignore rate limit headers and use the plain backoff curve.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date = httpdate::parse_http_date(value).ok()?;
    date.duration_since(SystemTime::now()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("60"));

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.retry_after, Some(Duration::from_secs(60)));
        assert_eq!(info.delay(Duration::from_secs(300)), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_retry_after_http_date() {
        let when = SystemTime::now() + Duration::from_secs(30);
        let mut headers = HeaderMap::new();
        headers.insert(
            "retry-after",
            HeaderValue::from_str(&httpdate::fmt_http_date(when)).unwrap(),
        );

        let delay = RateLimitInfo::from_headers(&headers)
            .delay(Duration::from_secs(300))
            .unwrap();
        assert!(delay <= Duration::from_secs(30));
        assert!(delay >= Duration::from_secs(28));
    }

    #[test]
    fn test_reset_timestamp_and_remaining() {
        let reset = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 120;
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-ratelimit-reset",
            HeaderValue::from_str(&reset.to_string()).unwrap(),
        );
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));

        let info = RateLimitInfo::from_headers(&headers);
        assert!(info.reset_at.is_some());
        assert_eq!(info.remaining, Some(0));

        let delay = info.delay(Duration::from_secs(300)).unwrap();
        assert!(delay > Duration::from_secs(100));
        assert!(delay <= Duration::from_secs(120));
    }

    #[test]
    fn test_delay_capped_by_max_wait() {
        let info = RateLimitInfo {
            retry_after: Some(Duration::from_secs(600)),
            ..Default::default()
        };
        assert_eq!(
            info.delay(Duration::from_secs(60)),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_out_of_range_reset_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-ratelimit-reset",
            HeaderValue::from_static("18446744073709551615"),
        );
        headers.insert("ratelimit-reset", HeaderValue::from_static("18446744073709551615"));

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.reset_at, None);
        assert!(info.is_empty());
        assert_eq!(info.delay(Duration::from_secs(60)), None);
    }

    #[test]
    fn test_no_headers() {
        let info = RateLimitInfo::from_headers(&HeaderMap::new());
        assert!(info.is_empty());
        assert_eq!(info.delay(Duration::from_secs(60)), None);
    }
}
