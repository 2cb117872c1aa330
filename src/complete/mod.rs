//! Completion system for the apsh input line.
//!
//! The engine merges candidates from several sources and supports stateful
//! cycling over the merged list. Components:
//!
//! - **Provider**: async source of candidates for an input prefix
//! - **Engine**: caching, ordered merge, deduplication, cursor cycling
//! - Concrete providers: manifest scripts, shell profile names, filesystem
//!   entries, and a static keyword table
//!
//! Providers are queried concurrently but their results are always merged
//! in the engine's fixed priority order: scripts, profile names, filesystem
//! entries, keywords.

mod engine;
mod keyword;
mod path;
mod profile;
mod provider;
mod script;

pub use engine::CompletionEngine;
pub use keyword::{KeywordProvider, all_keywords, keyword_categories};
pub use path::PathProvider;
pub use profile::ProfileProvider;
pub use provider::CandidateProvider;
pub use script::ScriptProvider;
