//! Show build details and per-node steps

use crate::circleci::{Action, ActionOutput, CircleClient};
use crate::cli::args::{OutputFormat, ShowArgs};
use crate::error::Result;
use crate::output::{json, pretty};

use super::common::{resolve_build_num, resolve_project};

/// Handle the show command
pub fn show(client: &CircleClient, args: &ShowArgs, format: OutputFormat) -> Result<String> {
    let project = resolve_project(args.target.project.project.as_ref())?;
    let build_num = resolve_build_num(client, &project, args.target.build_num)?;
    let build = client.get_build(&project, build_num)?;

    if format == OutputFormat::Json {
        return json::format_json(&build);
    }

    let fetch_outputs = |action: &Action| -> Option<Vec<ActionOutput>> {
        if !args.verbose {
            return None;
        }
        match client.get_action_outputs(action) {
            Ok(outputs) => Some(outputs),
            Err(e) => {
                eprintln!("error retrieving action output: {}", e.user_message());
                Some(Vec::new())
            }
        }
    };

    let mut output = pretty::format_build(&build);

    match args.build_node {
        Some(node) => {
            output.push_str("\n\n");
            output.push_str(&pretty::format_node(&build, node as usize, fetch_outputs));
        }
        None => {
            let mut fetch_outputs = fetch_outputs;
            for node in 0..build.parallel.max(1) as usize {
                output.push_str("\n\n");
                output.push_str(&pretty::format_node_heading(node));
                output.push('\n');
                output.push_str(&pretty::format_node(&build, node, &mut fetch_outputs));
            }
        }
    }

    Ok(output.trim_end().to_string())
}
