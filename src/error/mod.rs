//! Error handling module for apsh.
//!
//! This module provides the crate-wide error types:
//! - A single top-level [`ApshError`] wrapping more specific kinds
//! - A crate-wide [`Result`] alias
//! - Conversions from collaborator error types
//!
//! Most failures in apsh are reported to the output sink and never
//! propagate past a single operation; these types cover the cases that
//! do travel through `Result` (startup, configuration, shell spawning).

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ApshError, CommandError, ConfigError, Result, ShellError};
