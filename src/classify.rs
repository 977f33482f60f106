//! Maps failures to the error taxonomy.
//!
//! | Observed condition                        | Result          |
//! |-------------------------------------------|-----------------|
//! | connect / DNS / reset / body stream       | `Network`       |
//! | timeout governor fired                    | `Timeout`       |
//! | HTTP 5xx                                  | `Server`        |
//! | HTTP 429, envelope code 1059              | `RateLimit`     |
//! | HTTP 401/403, envelope code 401/403       | `Authorization` |
//! | any other non-success HTTP status         | `Request`       |
//! | envelope `succeeded=false`, other code    | `Api`           |
//! | unparsable body                           | `Decoding`      |

use crate::envelope::ResponseEnvelope;
use crate::rate_limit::RateLimitInfo;
use crate::ClientError;
use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// Envelope codes meaning the credential is invalid, expired, or lacks the
/// required role.
pub const AUTHORIZATION_CODES: &[i64] = &[401, 403];

/// Envelope codes meaning "requests too frequent".
pub const RATE_LIMIT_CODES: &[i64] = &[1059];

const MAX_MESSAGE_CHARS: usize = 512;

/// Classifies a transport failure.
pub fn transport_error(error: reqwest::Error, timeout: Duration) -> ClientError {
    if error.is_timeout() {
        return ClientError::Timeout { timeout };
    }
    if error.is_builder() {
        return ClientError::request(error.to_string());
    }

    ClientError::Network {
        message: error.to_string(),
        source: Some(error),
    }
}

/// Classifies a non-success HTTP status.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::classify::status_error;
/// use zsxq_sdk::ErrorKind;
/// use http::{HeaderMap, StatusCode};
///
/// let err = status_error(StatusCode::FORBIDDEN, &HeaderMap::new(), "");
/// assert_eq!(err.kind(), ErrorKind::Authorization);
///
/// let err = status_error(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "");
/// assert_eq!(err.kind(), ErrorKind::Server);
/// ```
pub fn status_error(status: StatusCode, headers: &HeaderMap, body: &str) -> ClientError {
    let message = body_message(status, body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let info = RateLimitInfo::from_headers(headers);
            ClientError::RateLimit {
                status: Some(status),
                code: None,
                message,
                rate_limit_info: (!info.is_empty()).then_some(info),
            }
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Authorization {
            status: Some(status),
            code: None,
            message,
        },
        s if s.is_server_error() => ClientError::Server { status, message },
        _ => ClientError::Request {
            status: Some(status),
            message,
        },
    }
}

/// Classifies an envelope that reported `succeeded = false`.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::classify::envelope_error;
/// use zsxq_sdk::envelope::ResponseEnvelope;
/// use zsxq_sdk::ErrorKind;
///
/// let envelope = ResponseEnvelope::from_body(
///     r#"{"succeeded":false,"code":401,"info":"token expired"}"#,
/// ).unwrap();
/// assert_eq!(envelope_error(&envelope).kind(), ErrorKind::Authorization);
/// ```
pub fn envelope_error(envelope: &ResponseEnvelope) -> ClientError {
    let code = envelope.code;
    let message = envelope.message();

    if AUTHORIZATION_CODES.contains(&code) {
        ClientError::Authorization {
            status: None,
            code: Some(code),
            message,
        }
    } else if RATE_LIMIT_CODES.contains(&code) {
        ClientError::RateLimit {
            status: None,
            code: Some(code),
            message,
            rate_limit_info: None,
        }
    } else {
        ClientError::Api { code, message }
    }
}

/// Prefers the envelope's `info`, then the raw body, then the reason phrase.
fn body_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = ResponseEnvelope::from_body(body) {
        if let Some(info) = envelope.info.filter(|i| !i.trim().is_empty()) {
            return info;
        }
    }

    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
    }

    body.chars().take(MAX_MESSAGE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::HeaderValue;

    fn envelope(code: i64) -> ResponseEnvelope {
        ResponseEnvelope {
            succeeded: false,
            code,
            info: Some("nope".to_string()),
            data: None,
        }
    }

    #[test]
    fn test_status_table() {
        let cases = [
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Server),
            (StatusCode::SERVICE_UNAVAILABLE, ErrorKind::Server),
            (StatusCode::TOO_MANY_REQUESTS, ErrorKind::RateLimit),
            (StatusCode::UNAUTHORIZED, ErrorKind::Authorization),
            (StatusCode::FORBIDDEN, ErrorKind::Authorization),
            (StatusCode::NOT_FOUND, ErrorKind::Request),
            (StatusCode::BAD_REQUEST, ErrorKind::Request),
            (StatusCode::MOVED_PERMANENTLY, ErrorKind::Request),
        ];

        for (status, expected) in cases {
            let err = status_error(status, &HeaderMap::new(), "");
            assert_eq!(err.kind(), expected, "status {}", status);
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_envelope_codes() {
        assert_eq!(envelope_error(&envelope(401)).kind(), ErrorKind::Authorization);
        assert_eq!(envelope_error(&envelope(403)).kind(), ErrorKind::Authorization);
        assert_eq!(envelope_error(&envelope(1059)).kind(), ErrorKind::RateLimit);

        let err = envelope_error(&envelope(1004));
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.server_code(), Some(1004));
        assert_eq!(err.message(), "nope");
    }

    #[test]
    fn test_rate_limit_headers_attached() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("2"));

        let err = status_error(StatusCode::TOO_MANY_REQUESTS, &headers, "slow down");
        assert_eq!(
            err.rate_limit_delay(Duration::from_secs(60)),
            Some(Duration::from_secs(2))
        );
        assert_eq!(err.message(), "slow down");
    }

    #[test]
    fn test_message_prefers_envelope_info() {
        let err = status_error(
            StatusCode::NOT_FOUND,
            &HeaderMap::new(),
            r#"{"succeeded":false,"code":404,"info":"group not found"}"#,
        );
        assert_eq!(err.message(), "group not found");
    }

    #[test]
    fn test_empty_body_uses_reason() {
        let err = status_error(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "  ");
        assert_eq!(err.message(), "Bad Gateway");
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(2_000);
        let err = status_error(StatusCode::BAD_REQUEST, &HeaderMap::new(), &body);
        assert_eq!(err.message().len(), MAX_MESSAGE_CHARS);
    }
}
