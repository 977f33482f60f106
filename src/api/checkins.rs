//! Checkins: habit-tracking programs run inside a group.

use super::{fetch_list, fetch_list_where, validate_id, Extra, RankEntry, RankingOptions, User};
use crate::request::RequestSpec;
use crate::{decode, ClientError, Executor, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A checkin program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    /// Unique checkin id.
    pub checkin_id: i64,

    /// Program name.
    #[serde(alias = "title")]
    pub name: String,

    /// Lifecycle status, e.g. `ongoing` or `closed`.
    #[serde(default)]
    pub status: String,

    /// Program description.
    #[serde(default)]
    pub text: Option<String>,

    /// Members who joined.
    #[serde(default)]
    pub joined_count: Option<u64>,

    /// Creation time, as sent by the server.
    #[serde(default)]
    pub create_time: Option<String>,
}

impl Checkin {
    /// Returns `true` if the program is still running.
    pub fn is_ongoing(&self) -> bool {
        matches!(self.status.as_str(), "ongoing" | "active")
    }
}

/// Participation counters for a checkin program.
///
/// `completed_count` never exceeds `joined_count`; payloads that say
/// otherwise are rejected as decoding errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinStats {
    /// Members who joined.
    pub joined_count: u64,

    /// Members who completed.
    pub completed_count: u64,

    /// Check-ins made today.
    #[serde(default)]
    pub checkined_today_count: Option<u64>,

    /// Any other counters.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Filter for checkin lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinScope {
    /// Programs still running.
    Ongoing,
    /// Programs closed by the owner.
    Closed,
    /// Programs past their end date.
    Over,
}

impl CheckinScope {
    /// Wire name of the scope.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckinScope::Ongoing => "ongoing",
            CheckinScope::Closed => "closed",
            CheckinScope::Over => "over",
        }
    }
}

impl fmt::Display for CheckinScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`Checkins::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCheckinsOptions {
    /// Server-side filter.
    pub scope: Option<CheckinScope>,
    /// Maximum entries to return. `0` returns nothing; negative is rejected.
    pub count: Option<i32>,
}

impl ListCheckinsOptions {
    /// Options with no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scope.
    pub fn scope(mut self, scope: CheckinScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Sets the count.
    pub fn count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Checkin operations.
#[derive(Debug, Clone)]
pub struct Checkins {
    executor: Executor,
}

impl Checkins {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns a group's checkin programs.
    ///
    /// With [`CheckinScope::Ongoing`] only running programs are returned,
    /// even if the server sends others along.
    pub async fn list(
        &self,
        group_id: i64,
        options: ListCheckinsOptions,
    ) -> Result<Vec<Checkin>> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/checkins", group_id))
            .with_optional_query("scope", options.scope);
        let ongoing_only = options.scope == Some(CheckinScope::Ongoing);

        fetch_list_where(&self.executor, spec, "checkins", options.count, |c: &Checkin| {
            !ongoing_only || c.is_ongoing()
        })
        .await
    }

    /// Returns one checkin program.
    pub async fn get(&self, group_id: i64, checkin_id: i64) -> Result<Checkin> {
        let spec = checkin_spec(group_id, checkin_id, "")?;
        self.executor
            .execute(spec, |data| decode::field(data, "checkin"))
            .await
    }

    /// Returns participation counters for a program.
    pub async fn get_statistics(&self, group_id: i64, checkin_id: i64) -> Result<CheckinStats> {
        let spec = checkin_spec(group_id, checkin_id, "/statistics")?;
        self.executor.execute(spec, decode_statistics).await
    }

    /// Returns a program's leaderboard.
    pub async fn get_ranking_list(
        &self,
        group_id: i64,
        checkin_id: i64,
        options: RankingOptions,
    ) -> Result<Vec<RankEntry>> {
        let spec = options.apply(checkin_spec(group_id, checkin_id, "/ranking_list")?);
        self.executor
            .execute(spec, |data| decode::list(data, "ranking_list"))
            .await
    }

    /// Returns members who joined a program.
    pub async fn get_joined_users(
        &self,
        group_id: i64,
        checkin_id: i64,
        count: Option<i32>,
    ) -> Result<Vec<User>> {
        let spec = checkin_spec(group_id, checkin_id, "/joined_users")?;
        fetch_list(&self.executor, spec, "users", count).await
    }
}

fn checkin_spec(group_id: i64, checkin_id: i64, suffix: &str) -> Result<RequestSpec> {
    validate_id("group_id", group_id)?;
    validate_id("checkin_id", checkin_id)?;
    Ok(RequestSpec::get(format!(
        "v2/groups/{}/checkins/{}{}",
        group_id, checkin_id, suffix
    )))
}

fn decode_statistics(data: Value) -> Result<CheckinStats> {
    let stats: CheckinStats = decode::value(data)?;
    if stats.completed_count > stats.joined_count {
        return Err(ClientError::decoding(format!(
            "completed_count {} exceeds joined_count {}",
            stats.completed_count, stats.joined_count
        )));
    }
    Ok(stats)
}
