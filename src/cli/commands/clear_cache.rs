use crate::circleci::CircleClient;
use crate::cli::args::{OutputFormat, ProjectArgs};
use crate::error::Result;

use super::common::resolve_project;

/// Handle the clear-cache command
pub fn clear_cache(client: &CircleClient, args: &ProjectArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.as_ref())?;
    let status = client.clear_cache(&project)?;

    match format {
        OutputFormat::Pretty => Ok(status),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "project": project.to_string(),
                "status": status,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
