//! Test results recorded for a build

use crate::circleci::CircleClient;
use crate::cli::args::{BuildTargetArgs, OutputFormat};
use crate::error::Result;
use crate::output;

use super::common::{resolve_build_num, resolve_project};

/// Handle the test-metadata command
pub fn test_metadata(client: &CircleClient, args: &BuildTargetArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;
    let build_num = resolve_build_num(client, &project, args.build_num)?;
    let tests = client.list_test_metadata(&project, build_num)?;

    output::format_test_metadata(&tests, format)
}
