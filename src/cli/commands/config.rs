use clap::ValueEnum;
use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::Result;

/// Handle the config command
pub fn config(
    config: &mut Config,
    paths: &Paths,
    args: &ConfigArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Set { key, value } => config_set(config, paths, key, value, format),
        ConfigCommands::Path => config_path(paths, format),
    }
}

/// Shorten a token to its first and last four characters
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    let mut safe_config = config.clone();
    safe_config.api.token = config.api.token.as_deref().map(mask_token);

    match format {
        OutputFormat::Pretty => {
            let not_set = "(not set)".dimmed().to_string();
            let color = safe_config
                .output
                .color
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default();

            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[api]".cyan()));
            output.push_str(&format!(
                "  token = {}\n",
                safe_config.api.token.as_deref().unwrap_or(not_set.as_str())
            ));
            output.push_str(&format!(
                "  host = {}\n",
                safe_config.api.host.as_deref().unwrap_or(not_set.as_str())
            ));

            output.push_str(&format!("\n{}\n", "[output]".cyan()));
            output.push_str(&format!("  color = {color}"));
            Ok(output)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&safe_config)?),
    }
}

fn config_set(config: &mut Config, paths: &Paths, key: &str, value: &str, format: OutputFormat) -> Result<String> {
    config.set(key, value)?;
    config.save_to(paths)?;

    let shown = if key == "api.token" {
        mask_token(value)
    } else {
        value.to_string()
    };

    match format {
        OutputFormat::Pretty => Ok(format!("{} Set {} = {}", "✓".green(), key, shown)),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": shown
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

fn config_path(paths: &Paths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "Config file: {}\nExists: {}",
            paths.config_file.display(),
            if paths.config_exists() {
                "yes".green()
            } else {
                "no".yellow()
            }
        )),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}
