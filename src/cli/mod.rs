//! Command-line interface for apsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Subcommand handling (version, completion, config)

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::Result;

/// APS Shell - an interactive PowerShell wrapper
#[derive(Parser, Debug)]
#[command(
    name = "apsh",
    version,
    about = "Interactive PowerShell wrapper with completion and slash commands",
    long_about = "An interactive command console wrapping a host shell (PowerShell by default)
with Tab completion merged from scripts, profile commands, the filesystem,
and a built-in keyword list, plus local slash commands."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Shell program to spawn (overrides the config file)
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Skip shell profile command discovery at startup
    #[arg(long = "no-profile")]
    pub no_profile: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for apsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: clap_complete::Shell,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Build a CLI interface from pre-parsed arguments (used in tests)
    pub fn with_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    ///
    /// # Returns
    /// * `&CliArgs` - Reference to arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    ///
    /// # Arguments
    /// * `config` - Configuration to modify
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(shell) = &args.shell {
            config.shell.program = shell.clone();
        }

        if args.no_color {
            config.display.color_output = false;
        }

        if args.no_profile {
            config.completion.profile_discovery = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                Self::generate_completion(*shell);
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("apsh version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Generate shell completion script on stdout
    ///
    /// # Arguments
    /// * `shell` - Shell type
    fn generate_completion(shell: clap_complete::Shell) {
        let mut cmd = CliArgs::command();
        clap_complete::generate(shell, &mut cmd, "apsh", &mut std::io::stdout());
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration file
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist; defaults apply");
            return Ok(());
        }

        match Config::from_file(&path) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => println!("Configuration validation failed: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version and shell info
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("apsh {} - type /help for commands", env!("CARGO_PKG_VERSION"));
            println!("Host shell: {}", self.config.shell.program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["apsh"]).unwrap();
        assert!(args.config_file.is_none());
        assert!(args.shell.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(vec!["apsh", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_shell_override_applies_to_config() {
        let args = CliArgs::try_parse_from(vec!["apsh", "--shell", "pwsh-preview"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.shell.program, "pwsh-preview");
    }

    #[test]
    fn test_no_color_disables_color_output() {
        let args = CliArgs::try_parse_from(vec!["apsh", "--no-color"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert!(!config.display.color_output);
    }

    #[test]
    fn test_no_profile_disables_discovery() {
        let args = CliArgs::try_parse_from(vec!["apsh", "--no-profile"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert!(!config.completion.profile_discovery);
    }

    #[test]
    fn test_verbosity_flags_set_log_level() {
        let args = CliArgs::try_parse_from(vec!["apsh", "-v"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Debug);

        let args = CliArgs::try_parse_from(vec!["apsh", "--vv"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Trace);

        let args = CliArgs::try_parse_from(vec!["apsh", "-q"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_completion_subcommand_parses() {
        let args = CliArgs::try_parse_from(vec!["apsh", "completion", "bash"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completion {
                shell: clap_complete::Shell::Bash
            })
        ));
    }

    #[test]
    fn test_config_subcommand_flags() {
        let args = CliArgs::try_parse_from(vec!["apsh", "config", "--show"]).unwrap();
        match args.command {
            Some(Commands::Config { show, validate }) => {
                assert!(show);
                assert!(!validate);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
