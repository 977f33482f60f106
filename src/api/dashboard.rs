//! Owner dashboard. Every call needs an owner or admin credential.
//!
//! A caller without the role gets `ClientError::Authorization`, which is
//! distinct from the `Request`/`Api` errors an unknown group produces.

use super::{validate_id, Extra};
use crate::request::RequestSpec;
use crate::{decode, Executor, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline numbers for a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Current members.
    #[serde(default)]
    pub members_count: Option<u64>,

    /// Members who joined today.
    #[serde(default)]
    pub new_members_count: Option<u64>,

    /// Members active today.
    #[serde(default)]
    pub active_members_count: Option<u64>,

    /// Topics published.
    #[serde(default)]
    pub topics_count: Option<u64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Income summary for a group, in the smallest currency unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Incomes {
    /// Lifetime income.
    #[serde(default)]
    pub total_amount: Option<i64>,

    /// Income yesterday.
    #[serde(default)]
    pub yesterday_amount: Option<i64>,

    /// Income this month.
    #[serde(default)]
    pub month_amount: Option<i64>,

    /// Any other fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Feature switches available to the group owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Privileges {
    /// Switch name to value.
    #[serde(flatten)]
    pub entries: Extra,
}

impl Privileges {
    /// Returns `true` if the named privilege is present and truthy.
    pub fn is_enabled(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Value::Bool(true)))
    }
}

/// Dashboard operations.
#[derive(Debug, Clone)]
pub struct Dashboard {
    executor: Executor,
}

impl Dashboard {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Returns a group's headline numbers.
    pub async fn get_overview(&self, group_id: i64) -> Result<Overview> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/dashboard/groups/{}/overview", group_id));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns a group's income summary.
    pub async fn get_incomes(&self, group_id: i64) -> Result<Incomes> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!(
            "v2/dashboard/groups/{}/incomes/overview",
            group_id
        ));
        self.executor.execute(spec, decode::value).await
    }

    /// Returns the owner's feature switches.
    pub async fn get_privileges(&self, group_id: i64) -> Result<Privileges> {
        validate_id("group_id", group_id)?;
        let spec = RequestSpec::get(format!("v2/dashboard/groups/{}/privileges", group_id));
        self.executor.execute(spec, decode::value).await
    }
}
