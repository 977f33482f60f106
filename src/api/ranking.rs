//! Leaderboards and scoreboards.

use super::{validate_id, Extra, User};
use crate::request::RequestSpec;
use crate::{decode, Executor, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One leaderboard row.
///
/// Different boards rank by different measures; the measure the board uses
/// is in `score` or `count`, and anything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based position.
    #[serde(default)]
    pub rank: u32,

    /// The ranked user, when embedded.
    #[serde(default)]
    pub user: Option<User>,

    /// The ranked user's id, when not embedded.
    #[serde(default)]
    pub user_id: Option<i64>,

    /// Points, for score boards.
    #[serde(default)]
    pub score: Option<i64>,

    /// Days, invitations, or contributions, for counting boards.
    #[serde(default)]
    pub count: Option<u64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Which measure a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingType {
    /// Longest current streak.
    Continuous,
    /// Total over the program's lifetime.
    Accumulated,
}

impl RankingType {
    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            RankingType::Continuous => "continuous",
            RankingType::Accumulated => "accumulated",
        }
    }
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for leaderboard calls.
///
/// # Examples
///
/// ```
/// use zsxq_sdk::api::{RankingOptions, RankingType};
///
/// let options = RankingOptions::new().ranking_type(RankingType::Continuous).index(2);
/// assert_eq!(options.index, Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingOptions {
    /// Measure to rank by. Defaults to the board's own default.
    pub ranking_type: Option<RankingType>,
    /// Page or period index.
    pub index: Option<u32>,
}

impl RankingOptions {
    /// Options with server defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ranking type.
    pub fn ranking_type(mut self, ranking_type: RankingType) -> Self {
        self.ranking_type = Some(ranking_type);
        self
    }

    /// Sets the index.
    pub fn index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub(crate) fn apply(&self, spec: RequestSpec) -> RequestSpec {
        spec.with_optional_query("type", self.ranking_type)
            .with_optional_query("index", self.index)
    }
}

/// Summary of a group leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingStats {
    /// Users on the board.
    #[serde(default)]
    pub total_users: Option<u64>,

    /// Highest score.
    #[serde(default)]
    pub top_score: Option<i64>,

    /// Mean score.
    #[serde(default)]
    pub avg_score: Option<f64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// The caller's standing on the scoreboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    /// The caller's points.
    #[serde(default)]
    pub my_score: Option<i64>,

    /// The caller's position.
    #[serde(default)]
    pub my_rank: Option<u32>,

    /// Users on the board.
    #[serde(default)]
    pub total_users: Option<u64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Scoreboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardSettings {
    /// Whether the scoreboard is on.
    #[serde(default)]
    pub enabled: bool,

    /// Scoring rules and any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Ranking operations.
#[derive(Debug, Clone)]
pub struct Ranking {
    executor: Executor,
}

impl Ranking {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns a group's activity leaderboard.
    pub async fn get_group_ranking(
        &self,
        group_id: i64,
        options: RankingOptions,
    ) -> Result<Vec<RankEntry>> {
        validate_id("group_id", group_id)?;
        let spec = options.apply(RequestSpec::get(format!(
            "v3/groups/{}/ranking_list",
            group_id
        )));
        self.ranking_list(spec).await
    }

    /// Returns a summary of a group's activity leaderboard.
    pub async fn get_group_ranking_stats(&self, group_id: i64) -> Result<RankingStats> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v3/groups/{}/ranking_list/statistics", group_id));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns a group's scoreboard.
    pub async fn get_score_ranking(
        &self,
        group_id: i64,
        options: RankingOptions,
    ) -> Result<Vec<RankEntry>> {
        validate_id("group_id", group_id)?;
        let spec = options.apply(RequestSpec::get(format!(
            "v2/groups/{}/scoreboard/ranking_list",
            group_id
        )));
        self.ranking_list(spec).await
    }

    /// Returns the caller's scoreboard standing.
    pub async fn get_my_score_stats(&self, group_id: i64) -> Result<ScoreStats> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!(
            "v2/groups/{}/scoreboard/statistics/self",
            group_id
        ));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns a group's scoreboard configuration.
    pub async fn get_scoreboard_settings(&self, group_id: i64) -> Result<ScoreboardSettings> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/scoreboard/settings", group_id));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns who invited the most members.
    pub async fn get_invitation_ranking(&self, group_id: i64) -> Result<Vec<RankEntry>> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/groups/{}/invitations/ranking_list", group_id));
        self.ranking_list(spec).await
    }

    /// Returns who contributed the most content.
    pub async fn get_contribution_ranking(&self, group_id: i64) -> Result<Vec<RankEntry>> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!(
            "v2/groups/{}/contributions/ranking_list",
            group_id
        ));
        self.ranking_list(spec).await
    }

    async fn ranking_list(&self, spec: RequestSpec) -> Result<Vec<RankEntry>> {
        self.executor
            .execute(spec, |data| decode::list(data, "ranking_list"))
            .await
    }
}
