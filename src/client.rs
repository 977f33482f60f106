//! The assembled client and its builder.
//!
//! [`ClientBuilder`] validates settings into an immutable [`Config`], creates
//! one [`Executor`], and hands a handle to it to every module client.

use crate::api::{Checkins, Dashboard, Groups, Misc, Ranking, Topics, Users};
use crate::config::{Config, Credential, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::rate_limit::RateLimitConfig;
use crate::retry::{Backoff, RetryPolicy, DEFAULT_MAX_RETRIES};
use crate::{ClientError, Executor, Result};
use std::time::Duration;

/// A ready-to-use platform client.
///
/// Cloning is cheap and clones share one executor and configuration.
///
/// # Examples
///
/// ```no_run
/// use zsxq_sdk::Client;
/// use zsxq_sdk::api::{CheckinScope, ListCheckinsOptions};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), zsxq_sdk::ClientError> {
/// let client = Client::builder()
///     .credential("your-token")
///     .timeout(Duration::from_secs(10))
///     .retry(3)
///     .build()?;
///
/// let me = client.users().current_user().await?;
/// println!("Hello, {}", me.name);
///
/// let (groups, ongoing) = tokio::join!(
///     client.groups().list(),
///     client
///         .checkins()
///         .list(42, ListCheckinsOptions::new().scope(CheckinScope::Ongoing)),
/// );
/// println!("{} groups, {} running checkins", groups?.len(), ongoing?.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    executor: Executor,
    users: Users,
    groups: Groups,
    topics: Topics,
    checkins: Checkins,
    dashboard: Dashboard,
    misc: Misc,
    ranking: Ranking,
}

impl Client {
    /// Creates a new `ClientBuilder`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Assembles a client around an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be
    /// initialized.
    pub fn from_config(config: Config) -> Result<Self> {
        let executor = Executor::new(config)?;

        Ok(Self {
            users: Users::new(executor.clone()),
            groups: Groups::new(executor.clone()),
            topics: Topics::new(executor.clone()),
            checkins: Checkins::new(executor.clone()),
            dashboard: Dashboard::new(executor.clone()),
            misc: Misc::new(executor.clone()),
            ranking: Ranking::new(executor.clone()),
            executor,
        })
    }

    /// The configuration shared by every module.
    pub fn config(&self) -> &Config {
        self.executor.config()
    }

    /// The shared executor, for endpoints no module covers.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// User operations.
    pub fn users(&self) -> &Users {
        &self.users
    }

    /// Group operations.
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Topic operations.
    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Checkin operations.
    pub fn checkins(&self) -> &Checkins {
        &self.checkins
    }

    /// Owner dashboard operations.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Settings, activity feed, and PK operations.
    pub fn misc(&self) -> &Misc {
        &self.misc
    }

    /// Leaderboard operations.
    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// Setters consume and return the builder, so two chains started from a
/// cloned builder never share state. Nothing is validated until
/// [`ClientBuilder::build`].
///
/// Defaults: base URL `https://api.zsxq.com`, timeout 10 000 ms, 3 retries,
/// exponential backoff from 200 ms capped at 5 s with jitter, rate-limit
/// waits capped at 60 s.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::{Backoff, ClientBuilder, ErrorKind};
/// use std::time::Duration;
///
/// let client = ClientBuilder::new()
///     .credential("token")
///     .timeout_ms(5_000)
///     .retry(2)
///     .backoff(Backoff::Fixed { delay: Duration::from_millis(100) })
///     .build()
///     .unwrap();
/// assert_eq!(client.config().max_retries(), 2);
///
/// let err = ClientBuilder::new().build().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Configuration);
/// ```
#[derive(Clone, Default)]
pub struct ClientBuilder {
    credential: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    backoff: Option<Backoff>,
    rate_limit: Option<RateLimitConfig>,
    user_agent: Option<String>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff", &self.backoff)
            .field("rate_limit", &self.rate_limit)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientBuilder {
    /// Creates a builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token. Required.
    pub fn credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(token.into());
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the per-attempt timeout in milliseconds.
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Sets how many times a transient failure is retried.
    pub fn retry(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the backoff curve between retries.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Sets how rate limit hints are honored.
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Points the client at another host, e.g. a staging server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validates the settings and assembles the client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if no credential was set, the
    /// credential is blank or not header-safe, the timeout is zero, or the
    /// base URL is invalid. No request is ever sent from here.
    pub fn build(self) -> Result<Client> {
        let token = self
            .credential
            .ok_or_else(|| ClientError::Configuration("credential is required".to_string()))?;

        let retry = RetryPolicy::new(
            self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            self.backoff.unwrap_or_default(),
            self.rate_limit.unwrap_or_default(),
        );

        let config = Config::from_parts(
            Credential::new(token)?,
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry,
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        )?;

        tracing::debug!(
            base_url = %config.base_url(),
            timeout_ms = config.timeout().as_millis(),
            max_retries = config.max_retries(),
            "Built client"
        );

        Client::from_config(config)
    }
}
