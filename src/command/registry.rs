//! Slash command trait and registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::output::OutputSink;

/// What the session should do after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep the session running.
    Continue,

    /// Terminate the session; the host honors this, the command does not
    /// exit the process itself.
    Exit,
}

/// A local command handled entirely within apsh.
///
/// Implementations are self-describing: name, one-line description, and
/// the handler. Handlers report through the sink and may fail; the router
/// catches failures at the dispatch boundary.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Command name as typed after the slash.
    fn name(&self) -> &str;

    /// One-line description for `/help`.
    fn describe(&self) -> &str;

    /// Execute with the remaining whitespace-delimited tokens.
    async fn execute(&self, args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome>;
}

/// Mapping from command name to handler.
///
/// Built once at startup and immutable during a session. Names are
/// matched case-sensitively on the leading token.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn SlashCommand>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its own name.
    ///
    /// A duplicate name is logged and skipped, never fatal.
    pub fn register(&mut self, command: Arc<dyn SlashCommand>) {
        let name = command.name().to_string();
        if self.commands.contains_key(&name) {
            warn!("duplicate command registration skipped: {}", name);
            return;
        }
        self.commands.insert(name, command);
    }

    /// Look up a command by name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SlashCommand>> {
        self.commands.get(name)
    }

    /// Iterate commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SlashCommand>> {
        self.commands.values()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;

    struct Probe(&'static str);

    #[async_trait]
    impl SlashCommand for Probe {
        fn name(&self) -> &str {
            self.0
        }

        fn describe(&self) -> &str {
            "probe"
        }

        async fn execute(&self, _args: &[String], _sink: &dyn OutputSink) -> Result<CommandOutcome> {
            Ok(CommandOutcome::Continue)
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Probe("alpha")));
        registry.register(Arc::new(Probe("beta")));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("gamma").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Probe("help")));
        assert!(registry.get("Help").is_none());
    }

    #[test]
    fn duplicate_registration_is_skipped() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Probe("dup")));
        registry.register(Arc::new(Probe("dup")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Probe("zeta")));
        registry.register(Arc::new(Probe("alpha")));

        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn probe_executes() {
        let sink = MemorySink::new();
        let outcome = Probe("x").execute(&[], &sink).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Continue);
    }
}
