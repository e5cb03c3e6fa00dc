//! Project and build filter types accepted on the command line

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CircleciError;

/// An `<account>/<repository>` pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub account: String,
    pub repository: String,
}

impl Project {
    pub fn new(account: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            repository: repository.into(),
        }
    }

    /// True when neither part is known
    pub fn is_empty(&self) -> bool {
        self.account.is_empty() && self.repository.is_empty()
    }
}

impl FromStr for Project {
    type Err = CircleciError;

    /// Splits on the first `/`; the repository part may itself contain slashes.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('/') {
            Some((account, repository)) => Ok(Self::new(account, repository)),
            None => Err(CircleciError::InvalidArgument(format!(
                "could not parse {value} as '<account>/<repo>'"
            ))),
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}/{}", self.account, self.repository)
    }
}

/// clap value parser for `--project`
pub fn parse_project(value: &str) -> Result<Project, String> {
    value.parse().map_err(|e: CircleciError| e.to_string())
}

/// Build status filter for recent builds
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Finished builds, whatever the outcome
    Completed,
    /// Builds that passed
    Successful,
    /// Builds that failed
    Failed,
    /// Builds currently running
    Running,
}

impl Filter {
    pub const ALL: [Filter; 4] = [
        Filter::Completed,
        Filter::Successful,
        Filter::Failed,
        Filter::Running,
    ];

    /// Value sent as the `filter` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Successful => "successful",
            Self::Failed => "failed",
            Self::Running => "running",
        }
    }
}

impl FromStr for Filter {
    type Err = CircleciError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == value)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                CircleciError::InvalidArgument(format!("must be one of {}", valid.join(",")))
            })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
