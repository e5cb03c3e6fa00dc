//! Retry and cancel builds

use crate::circleci::CircleClient;
use crate::cli::args::{BuildTargetArgs, OutputFormat};
use crate::error::Result;
use crate::output::json;

use super::common::{build_url, resolve_build_num, resolve_project};

/// Handle the retry-build command; prints the new build's URL
pub fn retry_build(
    client: &CircleClient,
    host: &str,
    args: &BuildTargetArgs,
    format: OutputFormat,
) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;
    let build_num = resolve_build_num(client, &project, args.build_num)?;
    let build = client.retry_build(&project, build_num)?;

    match format {
        OutputFormat::Pretty => Ok(build_url(host, &build)),
        OutputFormat::Json => json::format_json(&build),
    }
}

/// Handle the cancel-build command
pub fn cancel_build(client: &CircleClient, args: &BuildTargetArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;
    let build_num = resolve_build_num(client, &project, args.build_num)?;
    let build = client.cancel_build(&project, build_num)?;

    match format {
        OutputFormat::Pretty => Ok(format!("canceled build {}", build.build_num)),
        OutputFormat::Json => json::format_json(&build),
    }
}
