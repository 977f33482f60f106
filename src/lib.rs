//! # zsxq-sdk - A typed client for the Zsxq platform API
//!
//! Every call, whichever resource it touches, goes through one execution
//! core that authenticates, enforces a per-attempt timeout, retries
//! transient failures with backoff, decodes the platform's response
//! envelope into typed models, and classifies every failure into one
//! [`ClientError`] variant.
//!
//! ## Quick Start
//!
//! ```no_run
//! use zsxq_sdk::Client;
//! use zsxq_sdk::api::{ListTopicsOptions, TopicScope};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zsxq_sdk::ClientError> {
//!     let client = Client::builder()
//!         .credential("your-access-token")
//!         .timeout(Duration::from_secs(10))
//!         .retry(3)
//!         .build()?;
//!
//!     let me = client.users().current_user().await?;
//!     println!("Signed in as {}", me.name);
//!
//!     for group in client.groups().list().await? {
//!         println!("{} ({})", group.name, group.group_id);
//!     }
//!
//!     let digests = client
//!         .topics()
//!         .list(42, ListTopicsOptions::new().scope(TopicScope::Digests).count(5))
//!         .await?;
//!     println!("{} digests", digests.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! [`Client`] exposes `users`, `groups`, `topics`, `checkins`, `dashboard`,
//! `misc` and `ranking`. They all share one [`Executor`] and one immutable
//! [`Config`]; calls are independent and may run concurrently.
//!
//! ## Error Handling
//!
//! | Kind            | Retried | Typical cause                          |
//! |-----------------|---------|----------------------------------------|
//! | `Configuration` | no      | missing or blank credential            |
//! | `Network`       | yes     | connection refused, DNS, reset         |
//! | `Timeout`       | yes     | attempt exceeded the timeout           |
//! | `RateLimit`     | yes     | HTTP 429 or server code 1059           |
//! | `Server`        | yes     | HTTP 5xx                               |
//! | `Request`       | no      | other 4xx, invalid id or count         |
//! | `Authorization` | no      | HTTP 401/403, expired token, no role   |
//! | `Api`           | no      | `succeeded: false` with another code   |
//! | `Decoding`      | no      | payload has the wrong shape            |
//! | `Cancelled`     | no      | caller's cancellation token fired      |
//!
//! ```no_run
//! use zsxq_sdk::{Client, ClientError};
//!
//! # async fn example(client: Client) {
//! match client.dashboard().get_incomes(42).await {
//!     Ok(incomes) => println!("{:?}", incomes.total_amount),
//!     Err(ClientError::Authorization { .. }) => eprintln!("owner role required"),
//!     Err(e) if e.is_retryable() => eprintln!("gave up after retries: {}", e),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events for every attempt, response, retry, and
//! failure. The access token is never logged.

pub mod api;
pub mod classify;
mod client;
pub mod config;
pub mod decode;
pub mod envelope;
mod error;
mod executor;
pub mod rate_limit;
mod request;
pub mod retry;

pub use client::{Client, ClientBuilder};
pub use config::Config;
pub use error::{ClientError, ErrorKind, Result};
pub use executor::Executor;
pub use request::RequestSpec;
pub use retry::{Backoff, RetryPolicy, RetryState};
pub use tokio_util::sync::CancellationToken;
