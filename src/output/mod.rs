pub mod json;
pub mod pretty;
pub mod status;
pub mod table;

use colored::control::set_override;
use is_terminal::IsTerminal;

use crate::circleci::{Artifact, Build, EnvVar, ProjectInfo, TestMetadata};
use crate::cli::{ColorMode, OutputFormat};
use crate::error::Result;

pub use status::StatusStyle;

/// Turn ANSI colors on or off for the rest of the process.
///
/// `auto` colors only when stdout is a terminal and `NO_COLOR` is unset.
pub fn apply_color_mode(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    };
    set_override(enabled);
}

/// Terminal width when stdout is a terminal
pub fn terminal_width() -> Option<usize> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
}

/// Format followed projects based on output format
pub fn format_projects(projects: &[ProjectInfo], verbose: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_projects(projects, verbose)),
        OutputFormat::Json => json::format_json(projects),
    }
}

/// Format a list of builds based on output format
pub fn format_recent_builds(builds: &[Build], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_recent_builds(builds, terminal_width())),
        OutputFormat::Json => json::format_json(builds),
    }
}

/// Format artifacts based on output format
pub fn format_artifacts(artifacts: &[Artifact], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_artifacts(artifacts)),
        OutputFormat::Json => json::format_json(artifacts),
    }
}

/// Format test metadata based on output format
pub fn format_test_metadata(tests: &[TestMetadata], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_test_metadata(tests)),
        OutputFormat::Json => json::format_json(tests),
    }
}

/// Format environment variables based on output format
pub fn format_env_vars(vars: &[EnvVar], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_env_vars(vars)),
        OutputFormat::Json => json::format_json(vars),
    }
}

/// Remove ANSI escape sequences so assertions don't depend on color state
#[cfg(test)]
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
