//! Topics (posts) inside a group.

use super::{fetch_list, validate_id, Extra, User};
use crate::request::RequestSpec;
use crate::{decode, Executor, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A topic.
///
/// The body (`talk`, `question`, `answer`, `task`, ...) depends on the topic
/// type and is kept untyped in [`Topic::content`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic id.
    pub topic_id: i64,

    /// Topic type, e.g. `talk` or `q&a`.
    #[serde(rename = "type")]
    pub topic_type: String,

    /// Title, when the topic has one.
    #[serde(default)]
    pub title: Option<String>,

    /// Likes received.
    #[serde(default)]
    pub likes_count: u64,

    /// Comments received.
    #[serde(default)]
    pub comments_count: u64,

    /// Times read.
    #[serde(default)]
    pub reading_count: u64,

    /// Whether the topic is a digest.
    #[serde(default)]
    pub digested: bool,

    /// Whether the topic is pinned.
    #[serde(default)]
    pub sticky: bool,

    /// Creation time, as sent by the server.
    #[serde(default)]
    pub create_time: Option<String>,

    /// Type-specific body and any other fields.
    #[serde(flatten)]
    pub content: Extra,
}

/// A comment on a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment id.
    pub comment_id: i64,

    /// Comment text.
    #[serde(default)]
    pub text: String,

    /// Author.
    #[serde(default)]
    pub owner: Option<User>,

    /// Likes received.
    #[serde(default)]
    pub likes_count: u64,

    /// Creation time, as sent by the server.
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Filter for topic lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicScope {
    /// Every topic.
    All,
    /// Digests only.
    Digests,
    /// Topics by the group owner.
    ByOwner,
    /// Questions.
    Questions,
}

impl TopicScope {
    /// Wire name of the scope.
    pub fn as_str(self) -> &'static str {
        match self {
            TopicScope::All => "all",
            TopicScope::Digests => "digests",
            TopicScope::ByOwner => "by_owner",
            TopicScope::Questions => "questions",
        }
    }
}

impl fmt::Display for TopicScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`Topics::list`] and [`Topics::list_by_hashtag`].
///
/// # Examples
///
/// ```
/// use zsxq_sdk::api::{ListTopicsOptions, TopicScope};
///
/// let options = ListTopicsOptions::new().scope(TopicScope::Digests).count(5);
/// assert_eq!(options.count, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTopicsOptions {
    /// Server-side filter. Defaults to every topic.
    pub scope: Option<TopicScope>,
    /// Maximum entries to return. `0` returns nothing; negative is rejected.
    pub count: Option<i32>,
}

impl ListTopicsOptions {
    /// Options with no filter and the server's default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scope.
    pub fn scope(mut self, scope: TopicScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Sets the count.
    pub fn count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Topic operations.
#[derive(Debug, Clone)]
pub struct Topics {
    executor: Executor,
}

impl Topics {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns a group's topics, newest first.
    pub async fn list(&self, group_id: i64, options: ListTopicsOptions) -> Result<Vec<Topic>> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/topics", group_id))
            .with_optional_query("scope", options.scope);
        fetch_list(&self.executor, spec, "topics", options.count).await
    }

    /// Returns a topic by id.
    pub async fn get(&self, topic_id: i64) -> Result<Topic> {
        validate_id("topic_id", topic_id)?;
        let spec = RequestSpec::get(format!("v2/topics/{}", topic_id));
        self.executor
            .execute(spec, |data| decode::field(data, "topic"))
            .await
    }

    /// Returns comments on a topic.
    pub async fn get_comments(&self, topic_id: i64, count: Option<i32>) -> Result<Vec<Comment>> {
        validate_id("topic_id", topic_id)?;
        let spec = RequestSpec::get(format!("v2/topics/{}/comments", topic_id));
        fetch_list(&self.executor, spec, "comments", count).await
    }

    /// Returns a group's pinned topics.
    pub async fn list_sticky(&self, group_id: i64) -> Result<Vec<Topic>> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/topics/sticky", group_id));
        self.executor
            .execute(spec, |data| decode::list(data, "topics"))
            .await
    }

    /// Returns topics carrying a hashtag.
    pub async fn list_by_hashtag(
        &self,
        hashtag_id: i64,
        options: ListTopicsOptions,
    ) -> Result<Vec<Topic>> {
        validate_id("hashtag_id", hashtag_id)?;
        let spec = RequestSpec::get(format!("v2/hashtags/{}/topics", hashtag_id))
            .with_optional_query("scope", options.scope);
        fetch_list(&self.executor, spec, "topics", options.count).await
    }
}
