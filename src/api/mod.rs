//! Resource-scoped module clients.
//!
//! Each module is a thin, stateless façade over the shared
//! [`Executor`](crate::Executor): it validates its arguments, builds a
//! [`RequestSpec`], and decodes the payload into typed models. Obtain them
//! from [`Client`](crate::Client):
//!
//! ```no_run
//! use zsxq_sdk::Client;
//! use zsxq_sdk::api::{ListTopicsOptions, TopicScope};
//!
//! # async fn example() -> Result<(), zsxq_sdk::ClientError> {
//! let client = Client::builder().credential("token").build()?;
//!
//! let digests = client
//!     .topics()
//!     .list(42, ListTopicsOptions::new().scope(TopicScope::Digests).count(5))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod checkins;
pub mod dashboard;
pub mod groups;
pub mod misc;
pub mod ranking;
pub mod topics;
pub mod users;

pub use checkins::{Checkin, CheckinScope, CheckinStats, Checkins, ListCheckinsOptions};
pub use dashboard::{Dashboard, Incomes, Overview, Privileges};
pub use groups::{Group, GroupStats, Groups, Hashtag};
pub use misc::{Activity, ActivityScope, GlobalConfig, ListActivitiesOptions, Misc, PkBattle, PkGroup};
pub use ranking::{
    RankEntry, Ranking, RankingOptions, RankingStats, RankingType, ScoreStats, ScoreboardSettings,
};
pub use topics::{Comment, ListTopicsOptions, TopicScope, Topic, Topics};
pub use users::{User, UserStats, Users};

use crate::request::RequestSpec;
use crate::{decode, ClientError, Executor, Result};
use serde::de::DeserializeOwned;

/// Server fields a model does not name explicitly.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Rejects identifiers the platform can never resolve.
pub(crate) fn validate_id(name: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(ClientError::request(format!(
            "{} must be a positive integer, got {}",
            name, id
        )));
    }
    Ok(())
}

/// Rejects negative counts.
pub(crate) fn validate_count(count: Option<i32>) -> Result<Option<u32>> {
    count
        .map(|n| {
            u32::try_from(n).map_err(|_| {
                ClientError::request(format!("count must not be negative, got {}", n))
            })
        })
        .transpose()
}

/// Runs a list call honoring `count`.
///
/// `Some(0)` short-circuits without a request; otherwise the count is sent
/// and the result is cut to at most that many entries.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    executor: &Executor,
    spec: RequestSpec,
    field: &'static str,
    count: Option<i32>,
) -> Result<Vec<T>> {
    fetch_list_where(executor, spec, field, count, |_| true).await
}

/// Like [`fetch_list`], but drops entries failing `keep` before the result
/// is cut to `count`.
pub(crate) async fn fetch_list_where<T, P>(
    executor: &Executor,
    spec: RequestSpec,
    field: &'static str,
    count: Option<i32>,
    keep: P,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: FnMut(&T) -> bool,
{
    let count = validate_count(count)?;
    if count == Some(0) {
        return Ok(Vec::new());
    }

    let spec = spec.with_optional_query("count", count);
    let mut items: Vec<T> = executor
        .execute(spec, |data| decode::list(data, field))
        .await?;

    items.retain(keep);
    if let Some(limit) = count {
        items.truncate(limit as usize);
    }
    Ok(items)
}
