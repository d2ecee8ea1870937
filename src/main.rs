use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use forksentry::{CheckerOptions, CheckerState, ForkSyncChecker};

#[derive(Parser)]
#[command(name = "forksentry")]
#[command(about = "Scheduled checker that fast-forwards a GitHub fork behind its upstream")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (defaults to XDG config location)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one check: resolve the fork's parent, compare branches, and
    /// request a fast-forward if the fork is behind
    Check,

    /// Validate the configuration file and report every violation
    Validate,

    /// Report whether the checker is working, from recorded state
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    info!("Starting ForkSentry v{}", env!("CARGO_PKG_VERSION"));

    let options = load_options(cli.config)?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => cmd_check(&options).await,
        Commands::Validate => cmd_validate(&options),
        Commands::Status => cmd_status(&options),
    }
}

/// Initialize tracing with optional verbose mode
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Load options from the given path or the default XDG location
fn load_options(config_path: Option<std::path::PathBuf>) -> Result<CheckerOptions> {
    let path = match config_path {
        Some(path) => path,
        None => CheckerOptions::default_config_path()?,
    };

    CheckerOptions::load(&path)
        .with_context(|| format!("Failed to load configuration from {:?}", path))
}

/// Run one check invocation and emit the event, if any, to stdout
async fn cmd_check(options: &CheckerOptions) -> Result<()> {
    let checker = ForkSyncChecker::new();

    match checker.check(options).await {
        Ok(Some(outcome)) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            record_state(|state| state.record_event(Utc::now()));
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Check failed: {}", e);
            record_state(|state| state.record_error(Utc::now()));
            Err(e.into())
        }
    }
}

/// Validate configuration and report every violated constraint
fn cmd_validate(options: &CheckerOptions) -> Result<()> {
    match options.validate() {
        Ok(config) => {
            println!(
                "Configuration OK: checking {} ({} -> {})",
                config.repository, config.source_branch, config.target_branch
            );
            Ok(())
        }
        Err(e) => {
            if let Some(violations) = e.config_violations() {
                for violation in violations {
                    eprintln!("error: {}", violation);
                }
            }
            Err(anyhow::anyhow!("Configuration is invalid"))
        }
    }
}

/// Evaluate the liveness contract against recorded state
fn cmd_status(options: &CheckerOptions) -> Result<()> {
    let config = options.validate().map_err(anyhow::Error::from)?;
    let state_path = CheckerState::default_state_path()?;
    let state = CheckerState::load(&state_path)?;

    match state.last_event_at {
        Some(at) => println!("Last event: {}", at),
        None => println!("Last event: never"),
    }
    match state.last_error_at {
        Some(at) => println!("Last error: {}", at),
        None => println!("Last error: none"),
    }

    if forksentry::health::is_working(&state, config.max_silence_days, Utc::now()) {
        println!("Status: working");
        Ok(())
    } else {
        println!("Status: not working");
        std::process::exit(1);
    }
}

/// Update the recorded state; bookkeeping never masks the check's outcome
fn record_state(update: impl FnOnce(&mut CheckerState)) {
    let result = CheckerState::default_state_path().and_then(|path| {
        let mut state = CheckerState::load(&path).unwrap_or_default();
        update(&mut state);
        state.save(&path)
    });

    if let Err(e) = result {
        warn!("Failed to update checker state: {}", e);
    }
}
