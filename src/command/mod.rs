//! Command routing for submitted input lines.
//!
//! A submitted line is classified as a local slash command, a line to
//! forward to the host shell, or nothing at all, then dispatched:
//!
//! - **Local**: looked up in the [`CommandRegistry`] and executed under a
//!   guard that turns handler failures into one error-tagged sink line
//! - **Passthrough**: handed to the shell collaborator verbatim
//! - **Empty**: no-op
//!
//! The registry is built once at startup by explicit registration; each
//! command is a self-describing [`SlashCommand`] implementation.

mod builtins;
mod registry;
mod router;

pub use builtins::builtin_registry;
pub use registry::{CommandOutcome, CommandRegistry, SlashCommand};
pub use router::{CommandRouter, DispatchOutcome, LOCAL_PREFIX, RoutedCommand, classify};
