//! Project manifest collaborator.
//!
//! The script-name completion provider and several slash commands read the
//! project descriptor (`package.json`) from the working directory. Absence
//! of the file or a parse failure always yields an empty manifest; callers
//! never see an error from this module.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

/// File name of the project descriptor.
pub const MANIFEST_FILE: &str = "package.json";

/// Parsed project manifest.
///
/// Only the sections apsh cares about are modeled; unknown fields are
/// ignored. Script and dependency maps are ordered by name so output
/// derived from them is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Project name.
    #[serde(default)]
    pub name: Option<String>,

    /// Project description.
    #[serde(default)]
    pub description: Option<String>,

    /// Script name to script body mapping.
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,

    /// Runtime dependencies.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    /// Development dependencies.
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Load the manifest from a directory.
    ///
    /// A missing or unparseable descriptor yields the empty manifest.
    ///
    /// # Arguments
    /// * `dir` - Directory expected to contain the descriptor
    pub async fn load(dir: &Path) -> Self {
        let path = dir.join(MANIFEST_FILE);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("no manifest at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        Self::parse(&raw)
    }

    /// Parse manifest text, falling back to the empty manifest on error.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(manifest) => manifest,
            Err(e) => {
                debug!("failed to parse manifest: {}", e);
                Self::default()
            }
        }
    }

    /// Script names in manifest order.
    pub fn script_names(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    /// Whether the manifest carries no data at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.scripts.is_empty()
            && self.dependencies.is_empty()
            && self.dev_dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_scripts() {
        let manifest = Manifest::parse(r#"{"scripts": {"test": "mocha", "build": "webpack"}}"#);
        assert_eq!(manifest.script_names(), vec!["build", "test"]);
        assert_eq!(manifest.scripts["test"], "mocha");
    }

    #[test]
    fn parse_failure_yields_empty() {
        let manifest = Manifest::parse("{not json");
        assert!(manifest.is_empty());
    }

    #[test]
    fn parse_tolerates_missing_sections() {
        let manifest = Manifest::parse(r#"{"name": "demo"}"#);
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert!(manifest.scripts.is_empty());
    }

    #[test]
    fn parse_reads_dev_dependencies() {
        let manifest =
            Manifest::parse(r#"{"devDependencies": {"eslint": "^9.0.0"}, "dependencies": {"chalk": "^4"}}"#);
        assert_eq!(manifest.dev_dependencies["eslint"], "^9.0.0");
        assert_eq!(manifest.dependencies["chalk"], "^4");
    }

    #[tokio::test]
    async fn load_missing_directory_yields_empty() {
        let manifest = Manifest::load(Path::new("/definitely/not/here")).await;
        assert!(manifest.is_empty());
    }

    #[tokio::test]
    async fn load_reads_file_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"name": "pkg", "scripts": {"dev": "vite"}}"#,
        )
        .unwrap();

        let manifest = Manifest::load(dir.path()).await;
        assert_eq!(manifest.name.as_deref(), Some("pkg"));
        assert_eq!(manifest.script_names(), vec!["dev"]);
    }
}
