use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::Paths;
use crate::circleci::DEFAULT_HOST;
use crate::cli::ColorMode;
use crate::error::{CircleciError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// API-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// CircleCI API token
    pub token: Option<String>,
    /// CircleCI host, e.g. a self-hosted server
    pub host: Option<String>,
}

/// Output formatting preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default color mode
    #[serde(default)]
    pub color: ColorMode,
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        // Config file may hold the API token
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }

    /// Host to talk to: explicit flag, then config file, then circleci.com
    pub fn resolve_host(&self, host_arg: Option<&str>) -> String {
        host_arg
            .or(self.api.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
            .to_string()
    }

    /// Token to use: explicit flag/env, then token file, then config file.
    ///
    /// An unreadable token file is fatal.
    pub fn resolve_token(
        &self,
        token_arg: Option<&str>,
        token_file: Option<&Path>,
    ) -> Result<Option<String>> {
        if let Some(token) = token_arg.filter(|t| !t.is_empty()) {
            return Ok(Some(token.to_string()));
        }

        if let Some(path) = token_file {
            let contents = fs::read_to_string(path).map_err(CircleciError::TokenFile)?;
            return Ok(Some(contents.trim().to_string()));
        }

        Ok(self.api.token.clone())
    }

    /// Set a value by dotted key (`api.token`, `api.host`, `output.color`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.token" => self.api.token = Some(value.to_string()),
            "api.host" => self.api.host = Some(value.to_string()),
            "output.color" => {
                self.output.color = ColorMode::from_str(value, false).map_err(|_| {
                    CircleciError::Config(format!(
                        "invalid color mode '{value}' (expected auto, always or never)"
                    ))
                })?
            }
            _ => {
                return Err(CircleciError::Config(format!(
                    "unknown key '{key}'. Valid keys: api.token, api.host, output.color"
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_paths(temp_dir: &TempDir) -> Paths {
        Paths::in_dir(temp_dir.path().to_path_buf())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load/Save Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_returns_default_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let config = Config::load_from(&paths).unwrap();
        assert!(config.api.token.is_none());
        assert_eq!(config.output.color, ColorMode::Auto);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let mut config = Config::default();
        config.api.token = Some("test-token-123".to_string());
        config.api.host = Some("https://circle.example.com".to_string());
        config.output.color = ColorMode::Never;

        config.save_to(&paths).unwrap();

        let loaded = Config::load_from(&paths).unwrap();
        assert_eq!(loaded.api.token.as_deref(), Some("test-token-123"));
        assert_eq!(loaded.api.host.as_deref(), Some("https://circle.example.com"));
        assert_eq!(loaded.output.color, ColorMode::Never);
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(
            &paths.config_file,
            r#"
[output]
color = "always"
"#,
        )
        .unwrap();

        let config = Config::load_from(&paths).unwrap();
        assert!(config.api.token.is_none());
        assert_eq!(config.output.color, ColorMode::Always);
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(&paths.config_file, "[output]\ncolor = \"sometimes\"\n").unwrap();

        let err = Config::load_from(&paths).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_restrictive_permissions() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let mut config = Config::default();
        config.api.token = Some("secret-token".to_string());
        config.save_to(&paths).unwrap();

        let metadata = fs::metadata(&paths.config_file).unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Config file should have 0600 permissions");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_host_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_host(None), "https://circleci.com");

        config.api.host = Some("https://config.example.com".to_string());
        assert_eq!(config.resolve_host(None), "https://config.example.com");
        assert_eq!(
            config.resolve_host(Some("https://flag.example.com")),
            "https://flag.example.com"
        );
    }

    #[test]
    fn test_resolve_token_prefers_flag() {
        let mut config = Config::default();
        config.api.token = Some("from-config".to_string());

        let token = config.resolve_token(Some("from-flag"), None).unwrap();
        assert_eq!(token.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_resolve_token_reads_and_trims_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token");
        fs::write(&path, "  file-token\n").unwrap();

        let token = Config::default().resolve_token(None, Some(&path)).unwrap();
        assert_eq!(token.as_deref(), Some("file-token"));
    }

    #[test]
    fn test_resolve_token_empty_flag_falls_through() {
        let mut config = Config::default();
        config.api.token = Some("from-config".to_string());

        let token = config.resolve_token(Some(""), None).unwrap();
        assert_eq!(token.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_resolve_token_missing_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does-not-exist");

        let err = Config::default().resolve_token(None, Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("unable to read token-file"));
    }

    #[test]
    fn test_resolve_token_none_configured() {
        assert!(Config::default().resolve_token(None, None).unwrap().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setter Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        config.set("api.token", "abc").unwrap();
        config.set("api.host", "https://example.com").unwrap();
        config.set("output.color", "never").unwrap();

        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.api.host.as_deref(), Some("https://example.com"));
        assert_eq!(config.output.color, ColorMode::Never);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_color() {
        let mut config = Config::default();
        assert!(config.set("api.secret", "x").is_err());
        assert!(config.set("output.color", "sometimes").is_err());
    }
}
