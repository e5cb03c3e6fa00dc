//! Resolve the current project from the git `origin` remote

use colored::Colorize;
use tracing::debug;

use crate::project::Project;

/// Derive the default project from `git remote -v`.
///
/// Never fails: every problem is reported as a warning on stderr and the
/// empty project is returned, so an explicit `--project` can still be used.
pub fn current_project() -> Project {
    match remote_listing().and_then(|output| parse_origin(&output)) {
        Ok(project) => {
            debug!(project = %project, "resolved project from origin remote");
            project
        }
        Err(reason) => {
            eprintln!(
                "{}: could not determine current project, {}",
                "warning".yellow().bold(),
                reason
            );
            Project::default()
        }
    }
}

/// Run `git remote -v` and return its output
fn remote_listing() -> Result<String, String> {
    let output = std::process::Command::new("git")
        .args(["remote", "-v"])
        .output()
        .map_err(|e| format!("failed to run git: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{}: {}", output.status, stderr.trim()));
    }

    String::from_utf8(output.stdout).map_err(|e| format!("unreadable git output: {e}"))
}

/// Find the `origin` line in remote listing output and extract the project.
///
/// Accepts both scp-style (`git@host:account/repo.git`) and URL-style
/// (`https://host/account/repo`) remotes.
pub fn parse_origin(output: &str) -> Result<Project, String> {
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.first() != Some(&"origin") {
            continue;
        }

        if fields.len() != 3 {
            return Err(format!("unexpected number of fields in {line}"));
        }

        let url = fields[1];
        let path = url.rsplit(':').next().unwrap_or(url);
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() < 2 {
            return Err(format!("expected / in {url}"));
        }

        let account = parts[parts.len() - 2];
        let repository = parts[parts.len() - 1];
        let repository = repository.strip_suffix(".git").unwrap_or(repository);
        return Ok(Project::new(account, repository));
    }

    Err("no origin set".to_string())
}
