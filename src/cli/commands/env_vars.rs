//! Project environment variables

use crate::circleci::CircleClient;
use crate::cli::args::{AddEnvVarArgs, DeleteEnvVarArgs, OutputFormat, ProjectArgs};
use crate::error::Result;
use crate::output::{self, json};

use super::common::resolve_project;

/// Handle the add-env-var command
pub fn add_env_var(client: &CircleClient, args: &AddEnvVarArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;
    let var = client.add_env_var(&project, &args.name, &args.value)?;

    match format {
        // Echo what was sent; the API masks the stored value
        OutputFormat::Pretty => Ok(format!("added {}={}", args.name, args.value)),
        OutputFormat::Json => json::format_json(&var),
    }
}

/// Handle the list-env-vars command
pub fn list_env_vars(client: &CircleClient, args: &ProjectArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.as_ref())?;
    let vars = client.list_env_vars(&project)?;

    output::format_env_vars(&vars, format)
}

/// Handle the delete-env-var command
pub fn delete_env_var(client: &CircleClient, args: &DeleteEnvVarArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;
    client.delete_env_var(&project, &args.name)?;

    match format {
        OutputFormat::Pretty => Ok(format!("deleted {}", args.name)),
        OutputFormat::Json => {
            let json = serde_json::json!({ "deleted": args.name });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
