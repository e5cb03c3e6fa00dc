//! Recent builds, for one project or across all of them

use crate::circleci::CircleClient;
use crate::cli::args::{OutputFormat, RecentBuildsArgs};
use crate::error::{CircleciError, Result};
use crate::output;

use super::common::resolve_project;

/// Handle the recent-builds command
pub fn recent_builds(client: &CircleClient, args: &RecentBuildsArgs, format: OutputFormat) -> Result<String> {
    let builds = if args.all {
        check_all_conflicts(args)?;
        client.list_recent_builds(args.limit, args.offset)?
    } else {
        let project = resolve_project(args.project.project.as_ref())?;
        client.list_recent_builds_for_project(
            &project,
            args.branch.as_deref(),
            args.filter,
            args.limit,
            args.offset,
        )?
    };

    output::format_recent_builds(&builds, format)
}

/// `--all` lists every project, so per-project narrowing makes no sense
fn check_all_conflicts(args: &RecentBuildsArgs) -> Result<()> {
    let conflicts = [
        ("project", args.project.project.is_some()),
        ("branch", args.branch.is_some()),
        ("filter", args.filter.is_some()),
    ];

    match conflicts.iter().find(|(_, set)| *set) {
        Some((flag, _)) => Err(CircleciError::InvalidArgument(format!(
            "--{flag} cannot be used with --all"
        ))),
        None => Ok(()),
    }
}
