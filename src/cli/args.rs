use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::project::{parse_project, Filter, Project};

/// Tool for interacting with the CircleCI API
#[derive(Parser)]
#[command(name = "circleci")]
#[command(version, propagate_version = true)]
#[command(about = "Tool for interacting with the CircleCI API")]
pub struct Cli {
    /// CircleCI URI
    #[arg(short = 'H', long, env = "CIRCLE_HOST")]
    pub host: Option<String>,

    /// API token to use to access CircleCI (not needed for displaying information about public repositories)
    #[arg(short, long, env = "CIRCLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Load API token from specified file
    #[arg(short = 'f', long, env = "CIRCLE_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "CIRCLE_DEBUG")]
    pub debug: bool,

    /// Suppress or force highlighting
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Output format for command results
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// When to emit ANSI colors
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print projects
    Projects(ProjectsArgs),

    /// Recent builds for the current project
    #[command(alias = "recent")]
    RecentBuilds(RecentBuildsArgs),

    /// Show details for build
    Show(ShowArgs),

    /// Show artifacts for build (default to latest)
    #[command(alias = "artifacts")]
    ListArtifacts(ListArtifactsArgs),

    /// Show test metadata for build
    TestMetadata(BuildTargetArgs),

    /// Retry a build
    #[command(alias = "retry")]
    RetryBuild(BuildTargetArgs),

    /// Cancel a build
    #[command(alias = "cancel")]
    CancelBuild(BuildTargetArgs),

    /// Trigger a new build
    Build(TriggerArgs),

    /// Clear the build cache
    ClearCache(ProjectArgs),

    /// Add an environment variable to the project
    AddEnvVar(AddEnvVarArgs),

    /// List the environment variables for the project
    ListEnvVars(ProjectArgs),

    /// Delete an environment variable from the project
    DeleteEnvVar(DeleteEnvVarArgs),

    /// Add an SSH key to be used to access external systems
    AddSshKey(AddSshKeyArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// `--project` with its environment fallback; defaults to the git origin
#[derive(Args)]
pub struct ProjectArgs {
    /// Project as <account>/<repo> (defaults to the current git origin)
    #[arg(short, long, env = "CIRCLE_PROJECT", value_parser = parse_project)]
    pub project: Option<Project>,
}

/// A project plus an optional build number (defaults to the latest build)
#[derive(Args)]
pub struct BuildTargetArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Build number (leave empty for latest)
    #[arg(short = 'n', long, env = "CIRCLE_BUILD_NUM")]
    pub build_num: Option<u32>,
}

/// Arguments for the projects command
#[derive(Args)]
pub struct ProjectsArgs {
    /// Show additional information about projects
    #[arg(short, long, env = "CIRCLE_VERBOSE")]
    pub verbose: bool,

    /// Only print one project (useful with --verbose)
    #[arg(short, long, env = "CIRCLE_PROJECT", value_parser = parse_project)]
    pub project: Option<Project>,
}

/// Arguments for the recent-builds command
#[derive(Args)]
pub struct RecentBuildsArgs {
    /// Maximum of builds to return -- set to -1 for no limit
    #[arg(short, long, default_value = "30", env = "CIRCLE_LIMIT", allow_negative_numbers = true)]
    pub limit: i32,

    /// Offset in results to start at
    #[arg(short, long, default_value = "0", env = "CIRCLE_OFFSET")]
    pub offset: i32,

    /// Show builds for all projects
    #[arg(short, long, env = "CIRCLE_ALL_BUILDS")]
    pub all: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Show only builds on specified branch (cannot be used with --all)
    #[arg(short, long, env = "CIRCLE_BRANCH")]
    pub branch: Option<String>,

    /// Show only builds with given status (cannot be used with --all)
    #[arg(short, long, value_enum, env = "CIRCLE_FILTER")]
    pub filter: Option<Filter>,
}

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: BuildTargetArgs,

    /// For parallel builds, only show the build for the specified node
    #[arg(short = 'i', long, env = "CIRCLE_BUILD_NODE")]
    pub build_node: Option<u32>,

    /// Show step output
    #[arg(short, long, env = "CIRCLE_VERBOSE")]
    pub verbose: bool,
}

/// Arguments for the list-artifacts command
#[derive(Args)]
pub struct ListArtifactsArgs {
    #[command(flatten)]
    pub target: BuildTargetArgs,

    /// Download artifacts whose path matches this regular expression.
    /// Files are saved under the current directory at the artifact's path,
    /// with any leading `/` removed
    #[arg(short, long, env = "CIRCLE_DOWNLOAD_PATTERN")]
    pub download: Option<String>,
}

/// Arguments for the build command
#[derive(Args)]
pub struct TriggerArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Branch to trigger build on (leave empty for default branch)
    #[arg(short, long, env = "CIRCLE_BRANCH")]
    pub branch: Option<String>,
}

/// Arguments for the add-env-var command
#[derive(Args)]
pub struct AddEnvVarArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Variable name
    pub name: String,

    /// Variable value
    pub value: String,
}

/// Arguments for the delete-env-var command
#[derive(Args)]
pub struct DeleteEnvVarArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Variable name
    pub name: String,
}

/// Arguments for the add-ssh-key command
#[derive(Args)]
pub struct AddSshKeyArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Host the key grants access to
    pub hostname: String,

    /// Private key contents
    pub private_key: String,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api.token, api.host, output.color)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
