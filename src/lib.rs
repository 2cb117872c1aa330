//! APS Shell Library
//!
//! This library provides the core functionality for apsh, an interactive
//! console wrapping a host shell (PowerShell by default) with merged Tab
//! completion and local slash commands.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `command`: Line classification, slash command registry, and dispatch
//! - `complete`: Completion engine and candidate providers
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `manifest`: Project descriptor (package.json) access
//! - `output`: Tagged output sinks
//! - `repl`: Interactive line editor front-end
//! - `session`: Shared session state tying the pieces together
//! - `shell`: Host shell execution and profile discovery
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use apsh::command::{CommandRouter, builtin_registry, classify};
//! use apsh::config::Config;
//! use apsh::output::ConsoleSink;
//! use apsh::shell::HostShell;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let shell = Arc::new(HostShell::from_config(&config.shell));
//!     let router = CommandRouter::new(builtin_registry(shell.clone()), shell);
//!     let sink = ConsoleSink::new(true);
//!     router.dispatch(classify("Get-Location"), &sink).await;
//! }
//! ```

pub mod cli;
pub mod command;
pub mod complete;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod repl;
pub mod session;
pub mod shell;

// Re-export commonly used types
pub use command::{CommandRouter, DispatchOutcome, RoutedCommand, classify};
pub use complete::{CandidateProvider, CompletionEngine};
pub use config::Config;
pub use error::{ApshError, Result};
pub use repl::ReplEngine;
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
