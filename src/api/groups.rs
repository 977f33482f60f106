//! Groups (communities) the caller can see.

use super::{validate_id, Extra, User};
use crate::request::RequestSpec;
use crate::{decode, Executor, Result};
use serde::{Deserialize, Serialize};

/// A group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group id.
    pub group_id: i64,

    /// Group name.
    pub name: String,

    /// Membership model, e.g. `pay` or `free`.
    #[serde(rename = "type", default)]
    pub group_type: String,

    /// Number of members.
    #[serde(default)]
    pub member_count: Option<u64>,

    /// Group description.
    #[serde(default)]
    pub description: Option<String>,

    /// Cover image URL.
    #[serde(default)]
    pub background_url: Option<String>,

    /// The group owner.
    #[serde(default)]
    pub owner: Option<User>,

    /// Creation time, as sent by the server.
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Content and membership counters for a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Topics published.
    #[serde(default)]
    pub topics_count: Option<u64>,

    /// Current members.
    #[serde(default)]
    pub members_count: Option<u64>,

    /// Topics marked as digests.
    #[serde(default)]
    pub digests_count: Option<u64>,

    /// Any other counters.
    #[serde(flatten)]
    pub extra: Extra,
}

/// A hashtag defined in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hashtag {
    /// Unique hashtag id.
    pub hashtag_id: i64,

    /// Tag text.
    pub title: String,

    /// Topics carrying the tag.
    #[serde(default)]
    pub topics_count: u64,
}

/// Group operations.
#[derive(Debug, Clone)]
pub struct Groups {
    executor: Executor,
}

impl Groups {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns the groups the caller has joined.
    pub async fn list(&self) -> Result<Vec<Group>> {
        self.executor
            .execute(RequestSpec::get("v2/groups"), |data| {
                decode::list(data, "groups")
            })
            .await
    }

    /// Returns a group by id.
    pub async fn get(&self, group_id: i64) -> Result<Group> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}", group_id));
        self.executor
            .execute(spec, |data| decode::field(data, "group"))
            .await
    }

    /// Returns a group's counters.
    pub async fn get_statistics(&self, group_id: i64) -> Result<GroupStats> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/statistics", group_id));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns a group's hashtags.
    pub async fn get_hashtags(&self, group_id: i64) -> Result<Vec<Hashtag>> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/hashtags", group_id));
        self.executor
            .execute(spec, |data| decode::list(data, "hashtags"))
            .await
    }

    /// Returns one member of a group.
    pub async fn get_member(&self, group_id: i64, member_id: i64) -> Result<User> {
        validate_id("group_id", group_id)?;
        validate_id("member_id", member_id)?;
        let spec = RequestSpec::get(format!("v3/groups/{}/members/{}", group_id, member_id));
        self.executor
            .execute(spec, |data| decode::field(data, "user"))
            .await
    }
}
