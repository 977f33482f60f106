//! Immutable client configuration.
//!
//! A [`Config`] is produced once, validated, and then shared read-only by the
//! executor and every module client. Use [`crate::ClientBuilder`] for the
//! fluent form or [`Config::new`] when the defaults are enough.

use crate::rate_limit::RateLimitConfig;
use crate::retry::{Backoff, RetryPolicy, DEFAULT_MAX_RETRIES};
use crate::{ClientError, Result};
use http::HeaderValue;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.zsxq.com";

/// Per-attempt timeout used when none is set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// `User-Agent` sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("zsxq-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Name of the cookie carrying the access token.
pub const TOKEN_COOKIE: &str = "zsxq_access_token";

/// An access token.
///
/// The token never appears in `Debug` output or logs.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::config::Credential;
///
/// let credential = Credential::new("secret-token").unwrap();
/// assert_eq!(credential.expose(), "secret-token");
/// assert!(!format!("{:?}", credential).contains("secret"));
///
/// assert!(Credential::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    cookie: HeaderValue,
}

impl Credential {
    /// Validates a token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the token is empty, only
    /// whitespace, or cannot be carried in an HTTP header.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::Configuration(
                "credential must not be empty".to_string(),
            ));
        }

        let mut cookie = HeaderValue::try_from(format!("{}={}", TOKEN_COOKIE, token))
            .map_err(|_| {
                ClientError::Configuration(
                    "credential contains characters not allowed in a header".to_string(),
                )
            })?;
        cookie.set_sensitive(true);

        Ok(Self { token, cookie })
    }

    /// Returns the raw token.
    pub fn expose(&self) -> &str {
        &self.token
    }

    pub(crate) fn cookie(&self) -> &HeaderValue {
        &self.cookie
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Validated, immutable client settings.
#[derive(Debug, Clone)]
pub struct Config {
    credential: Credential,
    base_url: Url,
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: String,
}

impl Config {
    /// Creates a configuration with every default applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsxq_sdk::config::{Config, DEFAULT_TIMEOUT};
    ///
    /// let config = Config::new("token").unwrap();
    /// assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    /// assert_eq!(config.max_retries(), 3);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the credential is invalid.
    pub fn new(credential: impl Into<String>) -> Result<Self> {
        Self::from_parts(
            Credential::new(credential)?,
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            RetryPolicy::new(
                DEFAULT_MAX_RETRIES,
                Backoff::default(),
                RateLimitConfig::default(),
            ),
            DEFAULT_USER_AGENT.to_string(),
        )
    }

    pub(crate) fn from_parts(
        credential: Credential,
        base_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
        user_agent: String,
    ) -> Result<Self> {
        if timeout.is_zero() {
            return Err(ClientError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Configuration(format!("Invalid base URL: {}", e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "base URL must be http or https, got {}",
                base_url.scheme()
            )));
        }
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        if HeaderValue::try_from(user_agent.as_str()).is_err() {
            return Err(ClientError::Configuration(
                "user agent contains characters not allowed in a header".to_string(),
            ));
        }

        Ok(Self {
            credential,
            base_url,
            timeout,
            retry,
            user_agent,
        })
    }

    /// The access token.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Root every request path is resolved against. Always ends in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Time allowed for one attempt (connect plus full response).
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries allowed after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.retry.max_retries()
    }

    /// The retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The `User-Agent` header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolves a request path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::request(format!("Invalid request path {:?}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("token").unwrap();
        assert_eq!(config.base_url().as_str(), "https://api.zsxq.com/");
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.max_retries(), 3);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_blank_credentials_rejected() {
        for token in ["", " ", "\t\n"] {
            let err = Credential::new(token).unwrap_err();
            assert!(matches!(err, ClientError::Configuration(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_credential_with_newline_rejected() {
        let err = Credential::new("abc\r\nX-Evil: 1").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_cookie_value() {
        let credential = Credential::new("abc123").unwrap();
        assert_eq!(credential.cookie(), "zsxq_access_token=abc123");
        assert!(credential.cookie().is_sensitive());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_parts(
            Credential::new("token").unwrap(),
            DEFAULT_BASE_URL,
            Duration::ZERO,
            RetryPolicy::default(),
            DEFAULT_USER_AGENT.to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = Config::from_parts(
            Credential::new("token").unwrap(),
            "http://localhost:8080/api",
            DEFAULT_TIMEOUT,
            RetryPolicy::default(),
            DEFAULT_USER_AGENT.to_string(),
        )
        .unwrap();

        assert_eq!(
            config.endpoint("/v2/groups/1").unwrap().as_str(),
            "http://localhost:8080/api/v2/groups/1"
        );
        assert_eq!(
            config.endpoint("v2/groups").unwrap().as_str(),
            "http://localhost:8080/api/v2/groups"
        );
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let err = Config::from_parts(
            Credential::new("token").unwrap(),
            "ftp://example.com",
            DEFAULT_TIMEOUT,
            RetryPolicy::default(),
            DEFAULT_USER_AGENT.to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }
}
