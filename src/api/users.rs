//! Users: the caller's own profile and other members' public data.

use super::{validate_id, Extra, Group, Topic};
use crate::request::RequestSpec;
use crate::{decode, Executor, Result};
use serde::{Deserialize, Serialize};

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub user_id: i64,

    /// Display name.
    pub name: String,

    /// Group-specific nickname.
    #[serde(default)]
    pub alias: Option<String>,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Free-form location.
    #[serde(default)]
    pub location: Option<String>,

    /// Self-introduction.
    #[serde(default)]
    pub description: Option<String>,
}

/// Activity counters for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Topics the user has published.
    #[serde(default)]
    pub topics_count: Option<u64>,

    /// Likes the user has received.
    #[serde(default)]
    pub likes_count: Option<u64>,

    /// Users following this user.
    #[serde(default)]
    pub followers_count: Option<u64>,

    /// Users this user follows.
    #[serde(default)]
    pub followings_count: Option<u64>,

    /// Groups the user belongs to.
    #[serde(default)]
    pub joined_groups_count: Option<u64>,

    /// Any other counters.
    #[serde(flatten)]
    pub extra: Extra,
}

/// User operations.
#[derive(Debug, Clone)]
pub struct Users {
    executor: Executor,
}

impl Users {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns the user owning the credential.
    #[doc(alias = "self")]
    pub async fn current_user(&self) -> Result<User> {
        self.executor
            .execute(RequestSpec::get("v3/users/self"), |data| {
                decode::field(data, "user")
            })
            .await
    }

    /// Returns a user by id.
    pub async fn get(&self, user_id: i64) -> Result<User> {
        validate_id("user_id", user_id)?;
        let spec = RequestSpec::get(format!("v3/users/{}", user_id));
        self.executor
            .execute(spec, |data| decode::field(data, "user"))
            .await
    }

    /// Returns a user's activity counters.
    pub async fn get_statistics(&self, user_id: i64) -> Result<UserStats> {
        validate_id("user_id", user_id)?;
        let spec = RequestSpec::get(format!("v3/users/{}/statistics", user_id));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns a user's full-size avatar URL.
    pub async fn get_avatar_url(&self, user_id: i64) -> Result<String> {
        validate_id("user_id", user_id)?;
        let spec = RequestSpec::get(format!("v3/users/{}/avatar_url", user_id));
        self.executor
            .execute(spec, |data| decode::field(data, "avatar_url"))
            .await
    }

    /// Returns the topics a user has recently left a footprint on.
    pub async fn get_footprints(&self, user_id: i64) -> Result<Vec<Topic>> {
        validate_id("user_id", user_id)?;
        let spec = RequestSpec::get(format!("v2/users/{}/footprints", user_id));
        self.executor
            .execute(spec, |data| decode::list(data, "topics"))
            .await
    }

    /// Returns the groups a user owns.
    pub async fn get_created_groups(&self, user_id: i64) -> Result<Vec<Group>> {
        validate_id("user_id", user_id)?;
        let spec = RequestSpec::get(format!("v2/users/{}/created_groups", user_id));
        self.executor
            .execute(spec, |data| decode::list(data, "groups"))
            .await
    }

    /// Returns the users the caller has blocked.
    pub async fn get_blocked_users(&self) -> Result<Vec<User>> {
        self.executor
            .execute(RequestSpec::get("v2/users/block_users"), |data| {
                decode::list(data, "users")
            })
            .await
    }
}
