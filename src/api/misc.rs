//! Global settings, the activity feed, and PK (group-versus-group) events.

use super::{fetch_list, validate_id, Extra};
use crate::request::RequestSpec;
use crate::{decode, Executor, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Platform-wide client settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Setting name to value.
    #[serde(flatten)]
    pub settings: Extra,
}

impl GlobalConfig {
    /// Returns one setting.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }
}

/// An entry in the caller's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Entry type, e.g. `like` or `comment`.
    #[serde(rename = "type", default)]
    pub activity_type: String,

    /// Creation time, as sent by the server.
    #[serde(default)]
    pub create_time: Option<String>,

    /// Type-specific payload.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Filter for the activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityScope {
    /// Comments, mentions, and replies.
    General,
    /// Likes.
    Like,
    /// Platform announcements.
    SystemMessage,
}

impl ActivityScope {
    /// Wire name of the scope.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityScope::General => "general",
            ActivityScope::Like => "like",
            ActivityScope::SystemMessage => "system_message",
        }
    }
}

impl fmt::Display for ActivityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`Misc::get_activities`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListActivitiesOptions {
    /// Server-side filter.
    pub scope: Option<ActivityScope>,
    /// Maximum entries to return. `0` returns nothing; negative is rejected.
    pub count: Option<i32>,
}

impl ListActivitiesOptions {
    /// Options with no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scope.
    pub fn scope(mut self, scope: ActivityScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Sets the count.
    pub fn count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }
}

/// A PK event pitting groups against each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PkGroup {
    /// Unique PK group id.
    pub pk_group_id: i64,

    /// Event name.
    #[serde(default)]
    pub name: Option<String>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One battle within a PK event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PkBattle {
    /// Unique battle id.
    pub battle_id: i64,

    /// Battle status.
    #[serde(default)]
    pub status: Option<String>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Miscellaneous operations.
#[derive(Debug, Clone)]
pub struct Misc {
    executor: Executor,
}

impl Misc {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns platform-wide settings.
    pub async fn get_global_config(&self) -> Result<GlobalConfig> {
        self.executor
            .execute(RequestSpec::get("v2/settings"), decode::value)
            .await
    }

    /// Returns the caller's activity feed.
    pub async fn get_activities(&self, options: ListActivitiesOptions) -> Result<Vec<Activity>> {
        let spec = RequestSpec::get("v2/notifications").with_optional_query("scope", options.scope);
        fetch_list(&self.executor, spec, "notifications", options.count).await
    }

    /// Returns a PK event.
    pub async fn get_pk_group(&self, pk_group_id: i64) -> Result<PkGroup> {
        validate_id("pk_group_id", pk_group_id)?;
        let spec = RequestSpec::get(format!("v2/pk_groups/{}", pk_group_id));
        self.executor
            .execute(spec, |data| decode::field(data, "pk_group"))
            .await
    }

    /// Returns the battles of a PK event.
    pub async fn get_pk_battles(&self, pk_group_id: i64) -> Result<Vec<PkBattle>> {
        validate_id("pk_group_id", pk_group_id)?;
        let spec = RequestSpec::get(format!("v2/pk_groups/{}/battles", pk_group_id));
        self.executor
            .execute(spec, |data| decode::list(data, "battles"))
            .await
    }
}
