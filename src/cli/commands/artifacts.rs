//! List build artifacts, optionally downloading the matching ones

use std::path::{Component, Path, PathBuf};

use colored::Colorize;
use regex::Regex;

use crate::circleci::CircleClient;
use crate::cli::args::{ListArtifactsArgs, OutputFormat};
use crate::error::{CircleciError, Result};
use crate::output;

use super::common::{resolve_build_num, resolve_project};

/// Map an artifact path to a download location under the working directory.
///
/// Leading `/` is dropped; parent-directory components are rejected.
fn local_path(artifact_path: &str) -> Result<PathBuf> {
    let mut path = PathBuf::new();
    for component in Path::new(artifact_path).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                return Err(CircleciError::InvalidArgument(format!(
                    "unsafe artifact path rejected: {artifact_path}"
                )))
            }
        }
    }

    if path.as_os_str().is_empty() {
        return Err(CircleciError::InvalidArgument(format!(
            "invalid artifact path: {artifact_path:?}"
        )));
    }
    Ok(path)
}

/// Handle the list-artifacts command
pub fn list_artifacts(client: &CircleClient, args: &ListArtifactsArgs, format: OutputFormat) -> Result<String> {
    // A bad pattern should fail before any request is made
    let pattern = args.download.as_deref().map(Regex::new).transpose()?;

    let project = resolve_project(args.target.project.project.as_ref())?;
    let build_num = resolve_build_num(client, &project, args.target.build_num)?;
    let artifacts = client.list_build_artifacts(&project, build_num)?;

    if let Some(ref pattern) = pattern {
        for artifact in artifacts.iter().filter(|a| pattern.is_match(&a.path)) {
            let path = local_path(&artifact.path)?;
            eprint!("Downloading {}... ", path.display());
            client.download_artifact(&artifact.url, &path)?;
            eprintln!("{}", "done".green());
        }
    }

    output::format_artifacts(&artifacts, format)
}
