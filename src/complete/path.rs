//! Filesystem candidate provider.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::provider::CandidateProvider;

/// Provider that completes directory entries for a path-prefix fragment.
///
/// The input is split at its last path separator: everything before it
/// names the directory to list, the remainder filters entries by prefix
/// (case-insensitive). Directories are suffixed with the separator the
/// user already typed, or the platform separator when none was. Empty
/// input lists the current directory. A non-existent directory yields an
/// empty list; this provider never raises.
pub struct PathProvider {
    /// Directory relative inputs resolve against; `None` means the
    /// process working directory at query time (so `cd` is honored).
    root: Option<PathBuf>,
}

impl PathProvider {
    /// Create a provider resolving against the process working directory.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Create a provider resolving against a fixed directory.
    pub fn rooted(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    fn base_dir(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for PathProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandidateProvider for PathProvider {
    fn name(&self) -> &str {
        "path"
    }

    async fn candidates(&self, input: &str) -> Vec<String> {
        // Split into the typed directory part (separator included) and the
        // entry-name fragment being completed.
        let (dir_part, fragment) = match input.rfind(['/', '\\']) {
            Some(i) => (&input[..=i], &input[i + 1..]),
            None => ("", input),
        };
        let sep = dir_part.chars().next_back().unwrap_or(MAIN_SEPARATOR);

        let list_dir = if dir_part.is_empty() {
            self.base_dir()
        } else if Path::new(dir_part).is_absolute() {
            PathBuf::from(dir_part)
        } else {
            // Accept either separator style regardless of platform.
            let mut dir = self.base_dir();
            for component in dir_part.split(['/', '\\']).filter(|c| !c.is_empty()) {
                dir.push(component);
            }
            dir
        };

        let mut entries = match std::fs::read_dir(&list_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("cannot list {}: {}", list_dir.display(), e);
                return Vec::new();
            }
        }
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.to_lowercase().starts_with(&fragment.to_lowercase()) {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let mut candidate = format!("{dir_part}{name}");
            if is_dir {
                candidate.push(sep);
            }
            Some(candidate)
        })
        .collect::<Vec<_>>();

        // read_dir order is platform-defined; sort for a stable listing.
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_over(layout: &[(&str, bool)]) -> (tempfile::TempDir, PathProvider) {
        let dir = tempfile::tempdir().unwrap();
        for (name, is_dir) in layout {
            let path = dir.path().join(name);
            if *is_dir {
                std::fs::create_dir_all(&path).unwrap();
            } else {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).unwrap();
                }
                std::fs::write(&path, "").unwrap();
            }
        }
        let provider = PathProvider::rooted(dir.path().to_path_buf());
        (dir, provider)
    }

    #[tokio::test]
    async fn completes_path_fragment_with_dir_suffix() {
        let (_guard, provider) =
            provider_over(&[("src/core", true), ("src/commands.js", false)]);

        let matches = provider.candidates("src/co").await;
        assert_eq!(matches, vec!["src/commands.js", "src/core/"]);
    }

    #[tokio::test]
    async fn empty_input_lists_base_directory() {
        let (_guard, provider) = provider_over(&[("alpha", false), ("beta", true)]);

        let matches = provider.candidates("").await;
        assert_eq!(
            matches,
            vec!["alpha".to_string(), format!("beta{MAIN_SEPARATOR}")]
        );
    }

    #[tokio::test]
    async fn missing_directory_yields_empty() {
        let (_guard, provider) = provider_over(&[]);
        assert!(provider.candidates("nope/fr").await.is_empty());
    }

    #[tokio::test]
    async fn filter_is_case_insensitive() {
        let (_guard, provider) = provider_over(&[("README.md", false)]);
        assert_eq!(provider.candidates("read").await, vec!["README.md"]);
    }

    #[tokio::test]
    async fn trailing_separator_lists_that_directory() {
        let (_guard, provider) = provider_over(&[("src/lib.rs", false)]);
        assert_eq!(provider.candidates("src/").await, vec!["src/lib.rs"]);
    }

    #[tokio::test]
    async fn backslash_separator_is_preserved() {
        let (_guard, provider) = provider_over(&[("src/lib.rs", false)]);
        assert_eq!(provider.candidates("src\\li").await, vec!["src\\lib.rs"]);
    }
}
