//! Manifest script-name candidate provider.

use std::path::PathBuf;

use async_trait::async_trait;

use super::provider::CandidateProvider;
use crate::manifest::Manifest;

/// Provider that offers manifest script names behind a fixed prefix.
///
/// With prefix `"npm run"`, typing exactly `npm run` offers every script;
/// `npm run b` offers scripts starting with `b` (case-insensitive). Every
/// candidate is a full runnable line (`npm run build`). Any other input
/// yields nothing. The manifest is re-read on each query so edits to the
/// descriptor show up immediately; a missing or broken manifest simply
/// contributes nothing.
pub struct ScriptProvider {
    /// Textual prefix the input must carry, without trailing space.
    prefix: String,

    /// Directory to read the manifest from; `None` means the process
    /// working directory at query time.
    dir: Option<PathBuf>,
}

impl ScriptProvider {
    /// Create a provider reading the manifest from the working directory.
    ///
    /// # Arguments
    /// * `prefix` - Command prefix scripts are completed behind, e.g. `npm run`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            dir: None,
        }
    }

    /// Create a provider reading the manifest from a fixed directory.
    pub fn rooted(prefix: impl Into<String>, dir: PathBuf) -> Self {
        Self {
            prefix: prefix.into(),
            dir: Some(dir),
        }
    }

    async fn load_manifest(&self) -> Manifest {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        Manifest::load(&dir).await
    }
}

#[async_trait]
impl CandidateProvider for ScriptProvider {
    fn name(&self) -> &str {
        "script"
    }

    async fn candidates(&self, input: &str) -> Vec<String> {
        let fragment = if input == self.prefix {
            ""
        } else if let Some(rest) = input.strip_prefix(&self.prefix) {
            match rest.strip_prefix(' ') {
                Some(fragment) => fragment,
                None => return Vec::new(),
            }
        } else {
            return Vec::new();
        };

        let needle = fragment.to_lowercase();
        self.load_manifest()
            .await
            .script_names()
            .into_iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .map(|name| format!("{} {name}", self.prefix))
            .collect()
    }
}
