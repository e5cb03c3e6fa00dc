//! List followed projects

use crate::circleci::CircleClient;
use crate::cli::args::{OutputFormat, ProjectsArgs};
use crate::error::Result;
use crate::output;

/// Handle the projects command
///
/// `--project` only narrows the listing; the git origin is never consulted.
pub fn projects(client: &CircleClient, args: &ProjectsArgs, format: OutputFormat) -> Result<String> {
    let mut projects = client.list_projects()?;

    if let Some(ref wanted) = args.project {
        projects.retain(|p| p.username == wanted.account && p.reponame == wanted.repository);
    }

    output::format_projects(&projects, args.verbose, format)
}
