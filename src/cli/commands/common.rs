//! Helpers shared by the build-related commands

use tracing::debug;

use crate::circleci::{Build, CircleClient};
use crate::error::{CircleciError, Result};
use crate::git;
use crate::project::Project;

/// Resolve the project a command acts on.
///
/// An explicit `--project` wins; otherwise the git origin of the working
/// directory is used. Failing both, the command cannot proceed.
pub fn resolve_project(project_arg: Option<&Project>) -> Result<Project> {
    let project = match project_arg {
        Some(project) => project.clone(),
        None => git::current_project(),
    };

    if project.is_empty() {
        return Err(CircleciError::NoProject);
    }
    Ok(project)
}

/// Resolve the build number, falling back to the project's latest build
pub fn resolve_build_num(
    client: &CircleClient,
    project: &Project,
    build_num: Option<u32>,
) -> Result<u32> {
    if let Some(num) = build_num {
        return Ok(num);
    }

    let latest = client.latest_build(project)?.ok_or(CircleciError::NoBuilds)?;
    debug!(build_num = latest.build_num, %project, "using latest build");
    u32::try_from(latest.build_num)
        .map_err(|_| CircleciError::InvalidArgument(format!("invalid build number {}", latest.build_num)))
}

/// Web URL of a build, e.g. `https://circleci.com/gh/myorg/myrepo/42`
pub fn build_url(host: &str, build: &Build) -> String {
    format!(
        "{}/gh/{}/{}/{}",
        host.trim_end_matches('/'),
        build.username,
        build.reponame,
        build.build_num
    )
}
