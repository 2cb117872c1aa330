//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::session::Session;

/// Session-backed completer for reedline
///
/// reedline calls `complete` synchronously from the editor thread, so the
/// async session query is bridged with `block_in_place` on the current
/// runtime handle. Suggestions replace the whole line up to the cursor
/// because every provider returns full runnable lines.
pub struct SessionCompleter {
    session: Arc<Session>,
}

impl SessionCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `session` - Shared session holding the completion engine
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

impl Completer for SessionCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let input = line.get(..pos).unwrap_or(line).to_string();
        let session = Arc::clone(&self.session);

        let candidates = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(session.suggestions(&input))
        });

        candidates
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(0, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandRegistry, CommandRouter};
    use crate::complete::{CompletionEngine, KeywordProvider};
    use crate::error::Result;
    use crate::output::{MemorySink, OutputSink};
    use crate::shell::{ShellExecutor, ShellOutput};
    use async_trait::async_trait;

    struct NullShell;

    #[async_trait]
    impl ShellExecutor for NullShell {
        async fn run(&self, _command: &str) -> Result<ShellOutput> {
            Ok(ShellOutput::default())
        }
    }

    fn test_session() -> Arc<Session> {
        let engine = CompletionEngine::new(vec![Arc::new(KeywordProvider::with_keywords([
            "npm run ",
            "npm install ",
            "node ",
        ]))]);
        let router = CommandRouter::new(CommandRegistry::new(), Arc::new(NullShell));
        Arc::new(Session::new(
            engine,
            router,
            Arc::new(MemorySink::new()) as Arc<dyn OutputSink>,
        ))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn suggestions_span_the_whole_input() {
        let mut completer = SessionCompleter::new(test_session());
        let suggestions = completer.complete("npm", 3);

        // "npm run " and "npm install " match; "node " does not.
        assert_eq!(suggestions.len(), 2);
        for suggestion in &suggestions {
            assert_eq!(suggestion.span.start, 0);
            assert_eq!(suggestion.span.end, 3);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn only_text_before_the_cursor_is_queried() {
        let mut completer = SessionCompleter::new(test_session());
        let suggestions = completer.complete("npm ignored-tail", 3);
        assert!(suggestions.iter().any(|s| s.value == "npm run "));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_match_yields_no_suggestions() {
        let mut completer = SessionCompleter::new(test_session());
        assert!(completer.complete("zzz", 3).is_empty());
    }
}
