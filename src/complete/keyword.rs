//! Static keyword provider and the built-in command tables.

use async_trait::async_trait;

use super::provider::CandidateProvider;

/// Common PowerShell cmdlets offered as completions.
pub const POWERSHELL_COMMANDS: &[&str] = &[
    "Get-Process",
    "Get-Service",
    "Stop-Process",
    "Start-Process",
    "Get-Content",
    "Set-Content",
    "Get-Item",
    "Set-Item",
    "Get-Location",
    "Set-Location",
    "Clear-Host",
    "Write-Host",
    "Get-ChildItem",
    "Remove-Item",
    "Copy-Item",
    "Move-Item",
    "New-Item",
    "Invoke-Command",
    "Get-Help",
    "Get-Command",
];

/// npm-related commands.
pub const NPM_COMMANDS: &[&str] = &[
    "npm install",
    "npm start",
    "npm run",
    "node",
    "npx",
    "npm run build",
    "npm test",
    "npm init",
    "npm publish",
    "npm outdated",
    "npm update",
    "npm uninstall",
    "npm list",
    "npm cache clean",
    "npm run dev",
    "npm audit",
    "npm audit fix",
];

/// Unix-like commands.
pub const UNIX_COMMANDS: &[&str] = &["ls", "cd", "dir", "mkdir", "rm", "cp", "mv"];

/// Common development script names.
pub const DEV_COMMANDS: &[&str] = &[
    "lint",
    "lint:fix",
    "format",
    "format:check",
    "test",
    "build",
    "dev",
];

/// All keyword categories with display labels, in help order.
pub fn keyword_categories() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        ("PowerShell Commands", POWERSHELL_COMMANDS),
        ("NPM Commands", NPM_COMMANDS),
        ("Unix-like Commands", UNIX_COMMANDS),
        ("Development Commands", DEV_COMMANDS),
    ]
}

/// The combined keyword list used for completion.
///
/// npm and unix commands get a trailing space so accepting one leaves the
/// cursor ready for arguments.
pub fn all_keywords() -> Vec<String> {
    let mut keywords: Vec<String> = POWERSHELL_COMMANDS.iter().map(|c| c.to_string()).collect();
    keywords.extend(NPM_COMMANDS.iter().map(|c| format!("{c} ")));
    keywords.extend(UNIX_COMMANDS.iter().map(|c| format!("{c} ")));
    keywords.extend(DEV_COMMANDS.iter().map(|c| c.to_string()));
    keywords
}

/// Provider over a fixed keyword list, prefix-filtered.
pub struct KeywordProvider {
    /// Keywords offered as completions.
    keywords: Vec<String>,
}

impl KeywordProvider {
    /// Create a provider over the built-in keyword tables plus extras.
    ///
    /// # Arguments
    /// * `extra` - Additional keywords from configuration
    pub fn new(extra: &[String]) -> Self {
        let mut keywords = all_keywords();
        keywords.extend(extra.iter().cloned());
        Self { keywords }
    }

    /// Create a provider over an explicit keyword list.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl CandidateProvider for KeywordProvider {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn candidates(&self, input: &str) -> Vec<String> {
        let needle = input.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| k.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filters_case_insensitively() {
        let provider = KeywordProvider::with_keywords(["Get-Process", "Get-Service", "ls "]);
        let matches = provider.candidates("get-p").await;
        assert_eq!(matches, vec!["Get-Process"]);
    }

    #[tokio::test]
    async fn empty_input_yields_everything() {
        let provider = KeywordProvider::with_keywords(["one", "two"]);
        assert_eq!(provider.candidates("").await.len(), 2);
    }

    #[tokio::test]
    async fn builtin_tables_reachable() {
        let provider = KeywordProvider::new(&[]);
        let matches = provider.candidates("npm ru").await;
        assert!(matches.iter().any(|m| m == "npm run "));
        assert!(matches.iter().any(|m| m == "npm run build "));
    }

    #[tokio::test]
    async fn extra_keywords_are_offered() {
        let provider = KeywordProvider::new(&["cargo build".to_string()]);
        assert_eq!(provider.candidates("cargo").await, vec!["cargo build"]);
    }

    #[test]
    fn categories_cover_all_tables() {
        let categories = keyword_categories();
        assert_eq!(categories.len(), 4);
        let total: usize = categories.iter().map(|(_, cmds)| cmds.len()).sum();
        assert_eq!(total, all_keywords().len());
    }
}
