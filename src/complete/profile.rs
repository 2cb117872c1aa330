//! Shell profile candidate provider.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::provider::CandidateProvider;

/// Provider over function and alias names from the shell's profile script.
///
/// Discovery is asynchronous and owned by the host: at startup the session
/// spawns a task that queries the shell (see
/// [`crate::shell::discover_profile_commands`]) and installs the result
/// here. Until then, and whenever discovery fails, the provider simply
/// contributes nothing.
#[derive(Clone, Default)]
pub struct ProfileProvider {
    names: Arc<RwLock<Vec<String>>>,
}

impl ProfileProvider {
    /// Create an empty provider; names arrive via [`Self::install`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Install discovered names, replacing any previous set.
    pub fn install(&self, names: Vec<String>) {
        *self.names.write().unwrap() = names;
    }

    /// Number of currently known names.
    pub fn len(&self) -> usize {
        self.names.read().unwrap().len()
    }

    /// Whether no names are known yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CandidateProvider for ProfileProvider {
    fn name(&self) -> &str {
        "profile"
    }

    async fn candidates(&self, input: &str) -> Vec<String> {
        let needle = input.to_lowercase();
        self.names
            .read()
            .unwrap()
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }
}
