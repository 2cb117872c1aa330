//! Interactive front-end built on reedline.
//!
//! The line editor owns the terminal; completion requests are bridged to
//! the async [`crate::session::Session`] by the completer adapter, and
//! submitted lines are handed back to the host loop in `main`.

mod completer;
mod engine;
mod prompt;

pub use completer::SessionCompleter;
pub use engine::ReplEngine;
pub use prompt::ApshPrompt;
