use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A project followed by the authenticated user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reponame: String,
    pub vcs_url: Option<String>,
    pub default_branch: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub branches: BTreeMap<String, Branch>,
}

impl ProjectInfo {
    /// Most recent build on the default branch, if any
    pub fn default_branch_build(&self) -> Option<&BuildSummary> {
        let default = self.default_branch.as_deref()?;
        self.branches.get(default)?.latest_build()
    }
}

/// Per-branch build summary inside a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    pub recent_builds: Option<Vec<BuildSummary>>,
    pub running_builds: Option<Vec<BuildSummary>>,
}

impl Branch {
    pub fn latest_build(&self) -> Option<&BuildSummary> {
        self.recent_builds.as_deref().and_then(|builds| builds.first())
    }
}

/// Abbreviated build embedded in project listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub build_num: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub outcome: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub vcs_revision: Option<String>,
}

/// CircleCI build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(deserialize_with = "null_as_default")]
    pub build_num: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reponame: String,
    pub build_url: Option<String>,
    pub branch: Option<String>,
    pub vcs_revision: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub why: Option<String>,
    pub author_name: Option<String>,
    pub committer_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub outcome: Option<String>,
    pub lifecycle: Option<String>,
    pub queued_at: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub stop_time: Option<DateTime<Utc>>,
    pub build_time_millis: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub parallel: u32,
    pub build_parameters: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
}

impl Build {
    /// Wall-clock duration if the build has both started and stopped
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.stop_time) {
            (Some(start), Some(stop)) => Some(stop - start),
            _ => None,
        }
    }
}

/// One step of a build; holds one action per node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub actions: Vec<Action>,
}

impl Step {
    /// The action to display for a node.
    ///
    /// Non-parallel steps only run once, so their first action applies to
    /// every node.
    pub fn action_for_node(&self, node: usize) -> Option<&Action> {
        let first = self.actions.first()?;
        if first.parallel {
            self.actions.get(node)
        } else {
            Some(first)
        }
    }
}

/// Execution of a step on a single node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub step: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parallel: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_output: bool,
    pub output_url: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub run_time_millis: Option<i64>,
    pub bash_command: Option<String>,
}

impl Action {
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// A chunk of console output for an action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionOutput {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub output_type: String,
    pub time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// File produced by a build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    #[serde(deserialize_with = "null_as_default")]
    pub node_index: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    pub pretty_path: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Response wrapper for test metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMetadataResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub tests: Vec<TestMetadata>,
}

/// Result of a single test case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestMetadata {
    pub classname: Option<String>,
    pub file: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub result: String,
    /// Seconds
    #[serde(deserialize_with = "null_as_default")]
    pub run_time: f64,
    pub message: Option<String>,
    pub source: Option<String>,
}

/// Project environment variable (values come back masked)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvVar {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// Response to a cache clear request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearCacheResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// Body of an add-ssh-key request
#[derive(Debug, Clone, Serialize)]
pub struct SshKey<'a> {
    pub hostname: &'a str,
    pub private_key: &'a str,
}

/// Error body returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
