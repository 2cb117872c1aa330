//! APS Shell - Rust Edition
//!
//! An interactive command console wrapping a host shell (PowerShell by
//! default) with Tab completion merged from manifest scripts, profile
//! commands, the filesystem, and a built-in keyword list, plus local
//! slash commands handled in-process.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! apsh
//!
//! # Custom shell
//! apsh --shell pwsh
//! ```

use std::sync::Arc;
use tracing::Level;

use apsh::cli::CliInterface;
use apsh::command::{CommandRouter, DispatchOutcome, builtin_registry};
use apsh::complete::{
    CandidateProvider, CompletionEngine, KeywordProvider, PathProvider, ProfileProvider,
    ScriptProvider,
};
use apsh::config::Config;
use apsh::error::Result;
use apsh::output::{ConsoleSink, OutputSink, Tag};
use apsh::repl::ReplEngine;
use apsh::session::Session;
use apsh::shell::{HostShell, ShellExecutor, discover_profile_commands};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the interactive loop
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    // Handle subcommands (version, completion, config)
    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli).await
}

/// Run application in interactive mode
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let config = cli.config();
    let shell: Arc<dyn ShellExecutor> = Arc::new(HostShell::from_config(&config.shell));
    let sink: Arc<dyn OutputSink> = Arc::new(ConsoleSink::new(config.display.color_output));

    let profile = ProfileProvider::new();
    if config.completion.profile_discovery {
        spawn_profile_discovery(Arc::clone(&shell), profile.clone(), Arc::clone(&sink));
    }

    let engine = build_completion_engine(config, profile);
    let router = CommandRouter::new(builtin_registry(Arc::clone(&shell)), shell);
    let session = Arc::new(Session::new(engine, router, Arc::clone(&sink)));

    let mut repl = ReplEngine::new(Arc::clone(&session), &config.history);

    loop {
        let Some(line) = repl.read_line()? else {
            break;
        };
        if session.submit(&line).await == DispatchOutcome::Exit {
            break;
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Assemble the completion providers in priority order
///
/// Earlier providers win placement in the merged suggestion list:
/// manifest scripts, then profile commands, then filesystem entries, then
/// the static keyword tables.
fn build_completion_engine(config: &Config, profile: ProfileProvider) -> CompletionEngine {
    let providers: Vec<Arc<dyn CandidateProvider>> = vec![
        Arc::new(ScriptProvider::new(config.completion.script_prefix.clone())),
        Arc::new(profile),
        Arc::new(PathProvider::new()),
        Arc::new(KeywordProvider::new(&config.completion.extra_keywords)),
    ];
    CompletionEngine::new(providers)
}

/// Discover profile commands in the background
///
/// Discovery shells out and reads a file, so it runs off the startup path;
/// the provider contributes nothing until the names are installed.
fn spawn_profile_discovery(
    shell: Arc<dyn ShellExecutor>,
    profile: ProfileProvider,
    sink: Arc<dyn OutputSink>,
) {
    tokio::spawn(async move {
        let names = discover_profile_commands(shell.as_ref()).await;
        if !names.is_empty() {
            sink.append(
                Tag::Info,
                &format!("Loaded {} commands from shell profile", names.len()),
            );
            profile.install(names);
        }
    });
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
