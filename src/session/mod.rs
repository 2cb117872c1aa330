//! Session state shared between the line editor and the dispatch loop.
//!
//! A [`Session`] owns the completion engine, the command router, and the
//! output sink, and is shared by `Arc` handle. One dispatch runs at a time;
//! a submission while another is in flight is rejected with a single
//! warning line rather than queued.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::debug;

use crate::command::{CommandRouter, DispatchOutcome, RoutedCommand, classify};
use crate::complete::CompletionEngine;
use crate::manifest::Manifest;
use crate::output::{OutputSink, Tag};

pub struct Session {
    /// Completion state, serialized behind an async mutex so the reedline
    /// completer and the dispatch loop never race.
    engine: Mutex<CompletionEngine>,

    router: CommandRouter,

    sink: Arc<dyn OutputSink>,

    /// Set while a dispatch is in flight.
    busy: AtomicBool,
}

impl Session {
    /// Create a session.
    ///
    /// # Arguments
    /// * `engine` - Completion engine with providers already attached
    /// * `router` - Router with the command registry and shell collaborator
    /// * `sink` - Destination for all session output
    pub fn new(engine: CompletionEngine, router: CommandRouter, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            engine: Mutex::new(engine),
            router,
            sink,
            busy: AtomicBool::new(false),
        }
    }

    /// Submit a line for dispatch.
    ///
    /// Rejects the line with one warning if a dispatch is already running.
    /// Completion state is cleared after every accepted submission so the
    /// next Tab starts a fresh query.
    pub async fn submit(&self, line: &str) -> DispatchOutcome {
        if self.busy.swap(true, Ordering::SeqCst) {
            self.sink
                .append(Tag::Warning, "Still working on the previous command");
            return DispatchOutcome::Continue;
        }

        let routed = classify(line);
        let outcome = if let Some(target) = local_cd_target(&routed) {
            self.change_dir(target);
            DispatchOutcome::Continue
        } else if is_script_listing(&routed) {
            let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            list_npm_scripts(&dir, self.sink.as_ref()).await;
            DispatchOutcome::Continue
        } else {
            self.router.dispatch(routed, self.sink.as_ref()).await
        };

        self.engine.lock().await.reset();
        self.busy.store(false, Ordering::SeqCst);
        outcome
    }

    /// Whether a dispatch is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Current candidates for the given input, querying providers if the
    /// input changed since the last call.
    pub async fn suggestions(&self, input: &str) -> Vec<String> {
        self.engine.lock().await.request_suggestions(input).await
    }

    /// Query (if needed) and advance the completion cursor, returning the
    /// candidate it now points at.
    pub async fn next_suggestion(&self, input: &str) -> Option<String> {
        let mut engine = self.engine.lock().await;
        engine.request_suggestions(input).await;
        engine.advance_cursor().map(str::to_string)
    }

    /// Drop cached candidates and the cursor.
    pub async fn reset_completion(&self) {
        self.engine.lock().await.reset();
    }

    /// Change the process working directory.
    ///
    /// A spawned shell cannot change our cwd, so `cd` is handled here. A
    /// missing target goes to the home directory.
    fn change_dir(&self, target: Option<PathBuf>) {
        let dir = match target.or_else(dirs::home_dir) {
            Some(dir) => dir,
            None => {
                self.sink
                    .append(Tag::Error, "cd: could not determine home directory");
                return;
            }
        };
        if let Err(e) = std::env::set_current_dir(&dir) {
            self.sink.append(Tag::Error, &format!("cd: {e}"));
        } else {
            debug!("changed directory to {}", dir.display());
        }
    }
}

/// Detect a `cd` passthrough line.
///
/// Returns `Some(None)` for bare `cd` and `Some(Some(path))` with the rest
/// of the line as the target otherwise. Slash commands and anything else
/// return `None`.
fn local_cd_target(routed: &RoutedCommand) -> Option<Option<PathBuf>> {
    let RoutedCommand::Passthrough(line) = routed else {
        return None;
    };
    let rest = line.strip_prefix("cd")?;
    if rest.is_empty() {
        return Some(None);
    }
    // "cdx" is not cd.
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let target = rest.trim();
    if target.is_empty() {
        Some(None)
    } else {
        Some(Some(PathBuf::from(target)))
    }
}

/// Detect the bare `npm-scripts` listing command (case-insensitive).
fn is_script_listing(routed: &RoutedCommand) -> bool {
    matches!(routed, RoutedCommand::Passthrough(line) if line.eq_ignore_ascii_case("npm-scripts"))
}

/// List the manifest's scripts with their bodies.
///
/// A spawned shell has nothing useful to say about `package.json`, so the
/// listing is produced locally, next to the `cd` handling.
async fn list_npm_scripts(dir: &Path, sink: &dyn OutputSink) {
    let manifest = Manifest::load(dir).await;
    if manifest.scripts.is_empty() {
        sink.append(Tag::Warning, "No package.json found in the current directory");
        return;
    }
    sink.append(Tag::Success, "Available npm scripts:");
    for (name, body) in &manifest.scripts {
        sink.append(Tag::Output, &format!("  {name}: {body}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOutcome, CommandRegistry, SlashCommand};
    use crate::complete::KeywordProvider;
    use crate::error::Result;
    use crate::output::MemorySink;
    use crate::shell::{ShellExecutor, ShellOutput};
    use async_trait::async_trait;
    use std::time::Duration;

    struct EchoShell;

    #[async_trait]
    impl ShellExecutor for EchoShell {
        async fn run(&self, command: &str) -> Result<ShellOutput> {
            Ok(ShellOutput {
                stdout: format!("ran: {command}\n"),
                stderr: String::new(),
            })
        }
    }

    struct SlowCommand;

    #[async_trait]
    impl SlashCommand for SlowCommand {
        fn name(&self) -> &str {
            "slow"
        }

        fn describe(&self) -> &str {
            "sleeps briefly"
        }

        async fn execute(
            &self,
            _args: &[String],
            _sink: &dyn crate::output::OutputSink,
        ) -> Result<CommandOutcome> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(CommandOutcome::Continue)
        }
    }

    fn session_with_sink() -> (Session, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(SlowCommand));
        let router = CommandRouter::new(registry, Arc::new(EchoShell));
        let engine =
            CompletionEngine::new(vec![Arc::new(KeywordProvider::with_keywords(["npm run "]))]);
        let session = Session::new(engine, router, sink.clone() as Arc<dyn OutputSink>);
        (session, sink)
    }

    #[test]
    fn cd_detection() {
        assert_eq!(local_cd_target(&classify("cd")), Some(None));
        assert_eq!(
            local_cd_target(&classify("cd src")),
            Some(Some(PathBuf::from("src")))
        );
        assert_eq!(local_cd_target(&classify("cdimg")), None);
        assert_eq!(local_cd_target(&classify("/cd")), None);
        assert_eq!(local_cd_target(&classify("ls")), None);
    }

    #[test]
    fn script_listing_detection() {
        assert!(is_script_listing(&classify("npm-scripts")));
        assert!(is_script_listing(&classify("  NPM-Scripts  ")));
        assert!(!is_script_listing(&classify("npm-scripts extra")));
        assert!(!is_script_listing(&classify("/npm-scripts")));
    }

    #[tokio::test]
    async fn script_listing_reports_names_and_bodies() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"scripts": {"build": "webpack", "test": "mocha"}}"#,
        )
        .unwrap();

        let sink = MemorySink::new();
        list_npm_scripts(dir.path(), &sink).await;

        assert!(sink.contains("Available npm scripts:"));
        assert!(sink.contains("  build: webpack"));
        assert!(sink.contains("  test: mocha"));
    }

    #[tokio::test]
    async fn script_listing_without_manifest_warns() {
        let dir = tempfile::tempdir().unwrap();
        let sink = MemorySink::new();
        list_npm_scripts(dir.path(), &sink).await;

        assert_eq!(sink.count(Tag::Warning), 1);
        assert!(sink.contains("No package.json"));
    }

    #[tokio::test]
    async fn passthrough_line_reaches_the_shell() {
        let (session, sink) = session_with_sink();
        let outcome = session.submit("git status").await;

        assert_eq!(outcome, DispatchOutcome::Continue);
        assert!(sink.contains("ran: git status"));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn cd_into_missing_directory_reports_error_and_continues() {
        let (session, sink) = session_with_sink();
        let outcome = session.submit("cd /definitely/not/here").await;

        assert_eq!(outcome, DispatchOutcome::Continue);
        assert_eq!(sink.count(Tag::Error), 1);
        assert!(sink.lines()[0].text.starts_with("cd: "));
    }

    #[tokio::test]
    async fn concurrent_submission_is_rejected_with_one_warning() {
        let (session, sink) = session_with_sink();

        let first = session.submit("/slow");
        let second = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.submit("ls").await
        };
        let (a, b) = tokio::join!(first, second);

        assert_eq!(a, DispatchOutcome::Continue);
        assert_eq!(b, DispatchOutcome::Continue);
        assert_eq!(sink.count(Tag::Warning), 1);
        assert!(sink.contains("Still working"));
        // The rejected line never reached the shell.
        assert!(!sink.contains("ran: ls"));
    }

    #[tokio::test]
    async fn submission_clears_completion_state() {
        let (session, _sink) = session_with_sink();

        let first = session.next_suggestion("npm").await;
        assert_eq!(first.as_deref(), Some("npm run "));

        session.submit("   ").await;
        assert!(session.suggestions("npm").await == vec!["npm run ".to_string()]);
        // Cursor restarted from the beginning after the submit reset.
        assert_eq!(
            session.next_suggestion("npm").await.as_deref(),
            Some("npm run ")
        );
    }
}
