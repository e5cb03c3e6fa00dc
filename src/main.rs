use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use circleci_cli::circleci::CircleClient;
use circleci_cli::cli::args::CompletionsArgs;
use circleci_cli::cli::commands;
use circleci_cli::cli::{Cli, Commands};
use circleci_cli::config::{Config, Paths};
use circleci_cli::error::CircleciError;
use circleci_cli::output;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e.user_message());
        std::process::exit(e.exit_code());
    }
}

/// `--debug` forces debug level; otherwise `RUST_LOG` decides, defaulting to warn
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("circleci_cli=debug,circleci=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CircleciError> {
    let format = cli.output;

    // Completions need neither config nor client
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let paths = Paths::new()?;
    let mut config = Config::load_from(&paths)?;
    output::apply_color_mode(cli.color.unwrap_or(config.output.color));

    let output = match &cli.command {
        Commands::Config(args) => commands::config(&mut config, &paths, args, format)?,
        Commands::Completions(_) => unreachable!(), // Handled above
        command => {
            let host = config.resolve_host(cli.host.as_deref());
            let token = config.resolve_token(cli.token.as_deref(), cli.token_file.as_deref())?;
            debug!(%host, token = token.is_some(), "creating client");
            let client = CircleClient::new(&host, token)?;

            match command {
                Commands::Projects(args) => commands::projects(&client, args, format)?,
                Commands::RecentBuilds(args) => commands::recent_builds(&client, args, format)?,
                Commands::Show(args) => commands::show(&client, args, format)?,
                Commands::ListArtifacts(args) => commands::list_artifacts(&client, args, format)?,
                Commands::TestMetadata(args) => commands::test_metadata(&client, args, format)?,
                Commands::RetryBuild(args) => commands::retry_build(&client, &host, args, format)?,
                Commands::CancelBuild(args) => commands::cancel_build(&client, args, format)?,
                Commands::Build(args) => commands::trigger(&client, &host, args, format)?,
                Commands::ClearCache(args) => commands::clear_cache(&client, args, format)?,
                Commands::AddEnvVar(args) => commands::add_env_var(&client, args, format)?,
                Commands::ListEnvVars(args) => commands::list_env_vars(&client, args, format)?,
                Commands::DeleteEnvVar(args) => commands::delete_env_var(&client, args, format)?,
                Commands::AddSshKey(args) => commands::add_ssh_key(&client, args, format)?,
                Commands::Config(_) | Commands::Completions(_) => unreachable!(),
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
