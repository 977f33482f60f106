//! Error taxonomy for every call made through the client.
//!
//! Every failure, whichever module issued the call, ends up as exactly one
//! [`ClientError`] variant. Callers can match on the variant (or on the cheap
//! [`ErrorKind`] mirror) to decide between re-authenticating, backing off, or
//! giving up.

use crate::rate_limit::RateLimitInfo;
use http::StatusCode;
use std::fmt;
use std::time::Duration;

/// The closed set of failure kinds a call can produce.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::ErrorKind;
///
/// assert!(ErrorKind::Timeout.is_retryable());
/// assert!(!ErrorKind::Authorization.is_retryable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The client could not be built from the supplied settings.
    Configuration,
    /// Connection refused, DNS failure, reset, or a broken body stream.
    Network,
    /// An attempt did not complete within the configured timeout.
    Timeout,
    /// HTTP 429 or the platform's "too frequent" server code.
    RateLimit,
    /// HTTP 5xx.
    Server,
    /// HTTP 4xx other than 401/403/429, or a request rejected before sending.
    Request,
    /// HTTP 401/403 or an authorization server code.
    Authorization,
    /// The envelope reported `succeeded = false` with any other code.
    Api,
    /// The payload did not have the expected shape.
    Decoding,
    /// The caller cancelled the call.
    Cancelled,
}

impl ErrorKind {
    /// Returns `true` for kinds the executor retries automatically.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::Network | ErrorKind::Timeout | ErrorKind::RateLimit | ErrorKind::Server
        )
    }

    /// Stable name of the kind, as used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
            ErrorKind::Request => "request",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Api => "api",
            ErrorKind::Decoding => "decoding",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root error type returned by every operation.
///
/// # Examples
///
/// ```no_run
/// use zsxq_sdk::{Client, ClientError};
///
/// # async fn example() -> Result<(), ClientError> {
/// let client = Client::builder().credential("token").build()?;
///
/// match client.groups().get(123).await {
///     Ok(group) => println!("{}", group.name),
///     Err(ClientError::Authorization { message, .. }) => {
///         eprintln!("token rejected, log in again: {}", message);
///     }
///     Err(ClientError::RateLimit { .. }) => eprintln!("slow down"),
///     Err(e) => eprintln!("call failed ({}): {}", e.kind(), e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The builder rejected its settings. Raised from `build()` only.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A transport-level failure before a complete response was read.
    #[error("Network error: {message}")]
    Network {
        /// What went wrong.
        message: String,
        /// The underlying transport error, when there is one.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The attempt was aborted by the timeout governor.
    #[error("Request timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// The configured per-attempt timeout.
        timeout: Duration,
    },

    /// The platform asked the client to slow down.
    #[error("Rate limited: {message}")]
    RateLimit {
        /// HTTP status, when the limit came from the transport layer.
        status: Option<StatusCode>,
        /// Server code, when the limit came from the envelope.
        code: Option<i64>,
        /// Server-provided or synthesized message.
        message: String,
        /// Parsed `Retry-After` / `X-RateLimit-*` headers.
        rate_limit_info: Option<RateLimitInfo>,
    },

    /// HTTP 5xx.
    #[error("Server error {status}: {message}")]
    Server {
        /// The HTTP status.
        status: StatusCode,
        /// Server-provided message or raw body.
        message: String,
    },

    /// The request itself was wrong (bad path, bad id, invalid option).
    #[error("Request error: {message}")]
    Request {
        /// HTTP status, or `None` when the request was rejected locally.
        status: Option<StatusCode>,
        /// What was wrong.
        message: String,
    },

    /// The credential is invalid or lacks the required role.
    #[error("Authorization error: {message}")]
    Authorization {
        /// HTTP status, when the refusal came from the transport layer.
        status: Option<StatusCode>,
        /// Server code, when the refusal came from the envelope.
        code: Option<i64>,
        /// Server-provided message.
        message: String,
    },

    /// The envelope reported failure with a non-authorization code.
    #[error("API error {code}: {message}")]
    Api {
        /// The server code.
        code: i64,
        /// The server's `info` text.
        message: String,
    },

    /// The payload could not be turned into the expected type.
    #[error("Failed to decode response: {message}")]
    Decoding {
        /// The serde error or the violated shape constraint.
        message: String,
        /// The raw body, when the whole envelope failed to parse.
        raw_response: Option<String>,
    },

    /// A cancellation token fired before the call completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    pub(crate) fn request(message: impl Into<String>) -> Self {
        ClientError::Request {
            status: None,
            message: message.into(),
        }
    }

    pub(crate) fn decoding(message: impl Into<String>) -> Self {
        ClientError::Decoding {
            message: message.into(),
            raw_response: None,
        }
    }

    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Configuration(_) => ErrorKind::Configuration,
            ClientError::Network { .. } => ErrorKind::Network,
            ClientError::Timeout { .. } => ErrorKind::Timeout,
            ClientError::RateLimit { .. } => ErrorKind::RateLimit,
            ClientError::Server { .. } => ErrorKind::Server,
            ClientError::Request { .. } => ErrorKind::Request,
            ClientError::Authorization { .. } => ErrorKind::Authorization,
            ClientError::Api { .. } => ErrorKind::Api,
            ClientError::Decoding { .. } => ErrorKind::Decoding,
            ClientError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns `true` if the executor would retry this error.
    ///
    /// Network failures, timeouts, rate limits and 5xx responses are
    /// retryable. Everything else surfaces on first occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsxq_sdk::ClientError;
    /// use http::StatusCode;
    ///
    /// let err = ClientError::Server {
    ///     status: StatusCode::BAD_GATEWAY,
    ///     message: "upstream".to_string(),
    /// };
    /// assert!(err.is_retryable());
    ///
    /// let err = ClientError::Api { code: 1004, message: "not found".to_string() };
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Returns the originating HTTP status, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::RateLimit { status, .. }
            | ClientError::Request { status, .. }
            | ClientError::Authorization { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the server-reported envelope code, if any.
    pub fn server_code(&self) -> Option<i64> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            ClientError::RateLimit { code, .. } | ClientError::Authorization { code, .. } => *code,
            _ => None,
        }
    }

    /// Returns the human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            ClientError::Configuration(message)
            | ClientError::Network { message, .. }
            | ClientError::RateLimit { message, .. }
            | ClientError::Server { message, .. }
            | ClientError::Request { message, .. }
            | ClientError::Authorization { message, .. }
            | ClientError::Api { message, .. }
            | ClientError::Decoding { message, .. } => message.clone(),
            ClientError::Timeout { .. } | ClientError::Cancelled => self.to_string(),
        }
    }

    /// Returns parsed rate limit headers for `RateLimit` errors.
    pub fn rate_limit_info(&self) -> Option<&RateLimitInfo> {
        match self {
            ClientError::RateLimit {
                rate_limit_info, ..
            } => rate_limit_info.as_ref(),
            _ => None,
        }
    }

    /// Returns the server-advised wait, capped by `max_wait`.
    pub fn rate_limit_delay(&self, max_wait: Duration) -> Option<Duration> {
        self.rate_limit_info()?.delay(max_wait)
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds_match_policy_table() {
        let retryable = [
            ErrorKind::Network,
            ErrorKind::Timeout,
            ErrorKind::RateLimit,
            ErrorKind::Server,
        ];
        let terminal = [
            ErrorKind::Configuration,
            ErrorKind::Request,
            ErrorKind::Authorization,
            ErrorKind::Api,
            ErrorKind::Decoding,
            ErrorKind::Cancelled,
        ];

        assert!(retryable.iter().all(|k| k.is_retryable()));
        assert!(terminal.iter().all(|k| !k.is_retryable()));
    }

    #[test]
    fn test_accessors() {
        let err = ClientError::Authorization {
            status: Some(StatusCode::FORBIDDEN),
            code: None,
            message: "owner only".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.server_code(), None);
        assert_eq!(err.message(), "owner only");

        let err = ClientError::Api {
            code: 1004,
            message: "topic deleted".to_string(),
        };
        assert_eq!(err.server_code(), Some(1004));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "API error 1004: topic deleted");
    }

    #[test]
    fn test_timeout_display() {
        let err = ClientError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "Request timed out after 250ms");
        assert!(err.is_retryable());
    }
}
