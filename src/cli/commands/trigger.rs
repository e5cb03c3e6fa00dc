//! Trigger a new build

use tracing::debug;

use crate::circleci::CircleClient;
use crate::cli::args::{OutputFormat, TriggerArgs};
use crate::error::{CircleciError, Result};
use crate::output::json;

use super::common::{build_url, resolve_project};

/// Handle the build command
///
/// Without `--branch` the project's default branch is built.
pub fn trigger(client: &CircleClient, host: &str, args: &TriggerArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;

    let branch = match args.branch.as_deref().filter(|b| !b.is_empty()) {
        Some(branch) => branch.to_string(),
        None => {
            let info = client.get_project(&project)?;
            let branch = info.default_branch.filter(|b| !b.is_empty()).ok_or_else(|| {
                CircleciError::InvalidArgument(format!(
                    "project {project} has no default branch; use --branch"
                ))
            })?;
            debug!(%branch, "using default branch");
            branch
        }
    };

    let build = client.trigger_build(&project, &branch)?;

    match format {
        OutputFormat::Pretty => Ok(build_url(host, &build)),
        OutputFormat::Json => json::format_json(&build),
    }
}
