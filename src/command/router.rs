//! Classification and dispatch of submitted lines.

use std::sync::Arc;

use tracing::debug;

use super::registry::{CommandOutcome, CommandRegistry};
use crate::output::{OutputSink, Tag};
use crate::shell::ShellExecutor;

/// Prefix character marking a local command.
pub const LOCAL_PREFIX: char = '/';

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedCommand {
    /// A local slash command with its arguments.
    Local {
        /// Command name, without the prefix.
        name: String,
        /// Remaining whitespace-delimited tokens.
        args: Vec<String>,
    },

    /// A line forwarded verbatim to the host shell.
    Passthrough(String),

    /// Blank input; nothing to do.
    Empty,
}

/// Classify a submitted line.
///
/// Blank or whitespace-only input is [`RoutedCommand::Empty`]. A line
/// starting with the prefix character becomes a [`RoutedCommand::Local`]
/// with the first token as the case-sensitive name. Everything else is
/// passthrough. A bare prefix with no name counts as empty input.
pub fn classify(line: &str) -> RoutedCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return RoutedCommand::Empty;
    }

    match trimmed.strip_prefix(LOCAL_PREFIX) {
        Some(rest) => {
            let mut tokens = rest.split_whitespace();
            match tokens.next() {
                Some(name) => RoutedCommand::Local {
                    name: name.to_string(),
                    args: tokens.map(String::from).collect(),
                },
                None => RoutedCommand::Empty,
            }
        }
        None => RoutedCommand::Passthrough(trimmed.to_string()),
    }
}

/// What the host should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Keep accepting input.
    Continue,

    /// Terminate the session.
    Exit,
}

/// Dispatches classified lines to local handlers or the host shell.
pub struct CommandRouter {
    /// Local command registry, immutable during a session.
    registry: CommandRegistry,

    /// Shell collaborator for passthrough lines.
    shell: Arc<dyn ShellExecutor>,
}

impl CommandRouter {
    /// Create a new router.
    ///
    /// # Arguments
    /// * `registry` - Pre-built local command registry
    /// * `shell` - Collaborator that executes passthrough lines
    pub fn new(registry: CommandRegistry, shell: Arc<dyn ShellExecutor>) -> Self {
        Self { registry, shell }
    }

    /// Access the registry (used for help output and tests).
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch a classified line.
    ///
    /// Handler failures and unknown names are reported to the sink and
    /// never propagate; a failed operation does not end the session.
    pub async fn dispatch(&self, routed: RoutedCommand, sink: &dyn OutputSink) -> DispatchOutcome {
        debug!("dispatching {:?}", routed);
        match routed {
            RoutedCommand::Empty => DispatchOutcome::Continue,
            RoutedCommand::Local { name, args } => self.dispatch_local(&name, &args, sink).await,
            RoutedCommand::Passthrough(line) => {
                self.run_passthrough(&line, sink).await;
                DispatchOutcome::Continue
            }
        }
    }

    async fn dispatch_local(
        &self,
        name: &str,
        args: &[String],
        sink: &dyn OutputSink,
    ) -> DispatchOutcome {
        let Some(command) = self.registry.get(name) else {
            sink.append(
                Tag::Warning,
                &format!("Unknown command: {LOCAL_PREFIX}{name}"),
            );
            return DispatchOutcome::Continue;
        };

        match command.execute(args, sink).await {
            Ok(CommandOutcome::Exit) => DispatchOutcome::Exit,
            Ok(CommandOutcome::Continue) => DispatchOutcome::Continue,
            Err(e) => {
                sink.append(Tag::Error, &format!("{LOCAL_PREFIX}{name}: {e}"));
                DispatchOutcome::Continue
            }
        }
    }

    /// Hand a line to the shell collaborator and report its output.
    ///
    /// Non-empty stderr becomes a warning line; a spawn failure becomes an
    /// error line. Exit codes are not interpreted and nothing is retried.
    async fn run_passthrough(&self, line: &str, sink: &dyn OutputSink) {
        match self.shell.run(line).await {
            Ok(output) => {
                let stdout = output.stdout.trim_end();
                if !stdout.is_empty() {
                    sink.append(Tag::Output, stdout);
                }
                let stderr = output.stderr.trim_end();
                if !stderr.is_empty() {
                    sink.append(Tag::Warning, stderr);
                }
            }
            Err(e) => sink.append(Tag::Error, &e.to_string()),
        }
    }
}
