use thiserror::Error;

/// Result type alias for circleci-cli operations
pub type Result<T> = std::result::Result<T, CircleciError>;

/// Errors that can occur while talking to CircleCI
#[derive(Error, Debug)]
pub enum CircleciError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error with HTTP status
    #[error("CircleCI API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// 401/403 from the API
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16, token_supplied: bool },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The token file could not be read
    #[error("unable to read token-file: {0}")]
    TokenFile(std::io::Error),

    /// No project given and none could be resolved from git
    #[error(
        "no project specified. Use --project <account>/<repo>, set CIRCLE_PROJECT, \
         or run inside a repository with an 'origin' remote"
    )]
    NoProject,

    /// The project has no builds to default to
    #[error("no builds")]
    NoBuilds,

    /// Project not among the followed projects
    #[error("project {0} not found")]
    ProjectNotFound(String),

    /// Invalid download pattern
    #[error("Invalid download pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("{0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl CircleciError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Message shown to the user on stderr
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized {
                token_supplied: false,
                ..
            } => "unauthorized -- please supply API token either using -t or using the \
                  CIRCLE_TOKEN environment variable"
                .to_string(),
            Self::Unauthorized {
                token_supplied: true,
                ..
            } => "unauthorized -- supplied API token is not valid for this action".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_without_token_asks_for_one() {
        let err = CircleciError::Unauthorized {
            status: 401,
            token_supplied: false,
        };
        let msg = err.user_message();
        assert!(msg.contains("please supply API token"));
        assert!(msg.contains("CIRCLE_TOKEN"));
    }

    #[test]
    fn test_unauthorized_with_token_says_rejected() {
        let err = CircleciError::Unauthorized {
            status: 403,
            token_supplied: true,
        };
        let msg = err.user_message();
        assert!(msg.contains("not valid for this action"));
        assert!(!msg.contains("please supply"));
    }

    #[test]
    fn test_api_error_message_is_verbatim() {
        let err = CircleciError::api(404, "Project not found");
        assert_eq!(
            err.user_message(),
            "CircleCI API error (HTTP 404): Project not found"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_no_builds_message() {
        assert_eq!(CircleciError::NoBuilds.user_message(), "no builds");
    }
}
