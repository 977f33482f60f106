//! The request execution core shared by every module client.
//!
//! One [`Executor::execute`] call is one logical call: it authenticates,
//! bounds every attempt by the configured timeout, retries transient
//! failures with backoff, and either returns the decoded payload or a
//! classified [`ClientError`].

use crate::classify;
use crate::config::Config;
use crate::envelope::ResponseEnvelope;
use crate::request::RequestSpec;
use crate::retry::RetryState;
use crate::{ClientError, Result};
use http::header::{ACCEPT, COOKIE};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Issues requests on behalf of the module clients.
///
/// Cloning is cheap; clones share the connection pool and the immutable
/// [`Config`]. The executor keeps no state across calls, so any number of
/// calls may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use zsxq_sdk::{decode, Client, RequestSpec};
///
/// # async fn example() -> Result<(), zsxq_sdk::ClientError> {
/// let client = Client::builder().credential("token").build()?;
///
/// // Call an endpoint the module clients don't cover.
/// let spec = RequestSpec::get("v2/groups/42/columns");
/// let columns: Vec<serde_json::Value> = client
///     .executor()
///     .execute(spec, |data| decode::list(data, "columns"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Executor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    http_client: reqwest::Client,
    config: Config,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Executor {
    /// Creates an executor with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be
    /// initialized.
    pub fn new(config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            inner: Arc::new(ExecutorInner {
                http_client,
                config,
            }),
        })
    }

    /// The configuration every call uses.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Runs one logical call and decodes its payload with `decode`.
    ///
    /// `decode` receives the envelope's `data` (or `null`) and runs at most
    /// once, after a successful attempt. Its failures are not retried.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] kind except `Configuration` and `Cancelled`.
    pub async fn execute<T, F>(&self, spec: RequestSpec, decode: F) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        self.run(&spec, decode, None).await
    }

    /// Like [`Executor::execute`], but gives up with `ClientError::Cancelled`
    /// as soon as `cancel` fires, whether an attempt or a backoff wait is
    /// in progress.
    pub async fn execute_with_cancellation<T, F>(
        &self,
        spec: RequestSpec,
        decode: F,
        cancel: &CancellationToken,
    ) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        self.run(&spec, decode, Some(cancel)).await
    }

    async fn run<T, F>(
        &self,
        spec: &RequestSpec,
        decode: F,
        cancel: Option<&CancellationToken>,
    ) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        let policy = self.inner.config.retry_policy();
        let start_time = Instant::now();
        let mut state = RetryState::new();

        let data = loop {
            let attempt = state.begin_attempt();

            match cancellable(cancel, self.attempt(spec, attempt, start_time)).await {
                Ok(data) => break data,
                Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = %e.kind(),
                        attempt = attempt,
                        method = %spec.method,
                        path = %spec.path,
                        "Request failed"
                    );

                    let Some(delay) = policy.next_delay(&e, &state) else {
                        if e.is_retryable() {
                            tracing::warn!(
                                attempts = attempt,
                                kind = %e.kind(),
                                path = %spec.path,
                                "Retries exhausted"
                            );
                        }
                        return Err(e);
                    };

                    tracing::info!(
                        delay_ms = delay.as_millis(),
                        attempt = attempt,
                        kind = %e.kind(),
                        "Retrying request after delay"
                    );

                    state.record_retry(e, delay);
                    cancellable(cancel, async {
                        tokio::time::sleep(delay).await;
                        Ok(())
                    })
                    .await?;
                }
            }
        };

        decode(data).map_err(|e| {
            tracing::error!(
                error = %e,
                method = %spec.method,
                path = %spec.path,
                "Failed to decode response data"
            );
            e
        })
    }

    /// One attempt, bounded by the timeout governor.
    async fn attempt(&self, spec: &RequestSpec, attempt: u32, start_time: Instant) -> Result<Value> {
        let timeout = self.inner.config.timeout();

        match tokio::time::timeout(timeout, self.send(spec, attempt, start_time)).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout { timeout }),
        }
    }

    async fn send(&self, spec: &RequestSpec, attempt: u32, start_time: Instant) -> Result<Value> {
        let config = &self.inner.config;
        let mut url = config.endpoint(&spec.path)?;
        for (key, value) in &spec.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(
            method = %spec.method,
            url = %url,
            attempt = attempt,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(spec.method.clone(), url)
            .header(COOKIE, config.credential().cookie().clone())
            .header(ACCEPT, "application/json");

        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify::transport_error(e, config.timeout()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response
            .text()
            .await
            .map_err(|e| classify::transport_error(e, config.timeout()))?;

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            attempt = attempt,
            "Received HTTP response"
        );

        if !status.is_success() {
            let error = classify::status_error(status, &headers, &raw_body);
            if status.is_server_error() {
                tracing::warn!(status = status.as_u16(), response = %raw_body, "Server error (5xx)");
            } else {
                tracing::error!(status = status.as_u16(), response = %raw_body, "Request rejected");
            }
            return Err(error);
        }

        let envelope = ResponseEnvelope::from_body(&raw_body).map_err(|e| {
            tracing::error!(error = %e, raw_response = %raw_body, "Failed to parse envelope");
            ClientError::Decoding {
                message: e.to_string(),
                raw_response: Some(raw_body.clone()),
            }
        })?;

        if !envelope.succeeded {
            return Err(classify::envelope_error(&envelope));
        }

        Ok(envelope.into_data())
    }
}

async fn cancellable<T>(
    cancel: Option<&CancellationToken>,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(ClientError::Cancelled),
            result = work => result,
        },
        None => work.await,
    }
}
