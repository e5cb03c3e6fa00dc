use crate::circleci::CircleClient;
use crate::cli::args::{AddSshKeyArgs, OutputFormat};
use crate::error::Result;

use super::common::resolve_project;

/// Handle the add-ssh-key command
pub fn add_ssh_key(client: &CircleClient, args: &AddSshKeyArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.project.project.as_ref())?;
    client.add_ssh_key(&project, &args.hostname, &args.private_key)?;

    match format {
        OutputFormat::Pretty => Ok(format!("added key for {}", args.hostname)),
        OutputFormat::Json => {
            let json = serde_json::json!({ "added": true, "hostname": args.hostname });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
