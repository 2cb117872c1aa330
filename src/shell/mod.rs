//! External shell collaborator.
//!
//! apsh never interprets the lines the user forwards to the host shell; it
//! hands them to a [`ShellExecutor`] and reports whatever comes back. The
//! default executor spawns a fresh PowerShell process per command, which is
//! also how the profile-discovery helper asks the shell where its startup
//! script lives.

use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, ShellError};

/// Captured output of one shell invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// Standard output, decoded lossily.
    pub stdout: String,

    /// Standard error, decoded lossily.
    pub stderr: String,
}

/// Collaborator that executes a single command line.
///
/// Implementations accept one command-line string and asynchronously return
/// its stdout/stderr, or a failure with a message. Exit codes are not part
/// of the contract; callers treat non-empty stderr as a warning.
#[async_trait]
pub trait ShellExecutor: Send + Sync {
    /// Run one command line to completion.
    async fn run(&self, command: &str) -> Result<ShellOutput>;
}

/// Shell executor that spawns the configured host shell per command.
pub struct HostShell {
    /// Shell program name or path.
    program: String,

    /// Arguments placed before the command string (e.g. `-Command`).
    args: Vec<String>,
}

impl HostShell {
    /// Create a new host shell executor.
    ///
    /// # Arguments
    /// * `program` - Shell program name or path
    /// * `args` - Arguments placed before the command string
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create an executor from the shell configuration section.
    pub fn from_config(config: &crate::config::ShellConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

#[async_trait]
impl ShellExecutor for HostShell {
    async fn run(&self, command: &str) -> Result<ShellOutput> {
        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ShellError::SpawnFailed(format!("{}: {e}", self.program)))?;

        Ok(ShellOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// `function <name>` declarations in a profile script.
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*function\s+([A-Za-z_][\w-]*)").expect("function pattern")
});

/// `Set-Alias`/`New-Alias` declarations, with or without `-Name`.
static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:Set|New)-Alias\s+(?:-Name\s+)?([A-Za-z_][\w-]*)").expect("alias pattern")
});

/// Extract user-defined function and alias names from profile script text.
///
/// Names are deduplicated preserving first-seen order, so a name declared
/// both as a function and as an alias counts once.
pub fn parse_profile_commands(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut names: Vec<String> = Vec::new();
    for caps in FUNCTION_RE
        .captures_iter(content)
        .chain(ALIAS_RE.captures_iter(content))
    {
        let name = caps[1].to_string();
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

/// Discover function and alias names declared in the shell's profile script.
///
/// Asks the shell for `$PROFILE`, reads the script, and extracts names.
/// Every failure along the way yields an empty list; discovery is best
/// effort and never surfaces an error to the caller.
pub async fn discover_profile_commands(shell: &dyn ShellExecutor) -> Vec<String> {
    let output = match shell.run("Write-Output $PROFILE").await {
        Ok(output) => output,
        Err(e) => {
            debug!("profile path lookup failed: {}", e);
            return Vec::new();
        }
    };

    let path = output.stdout.trim();
    if path.is_empty() {
        return Vec::new();
    }

    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_profile_commands(&content),
        Err(e) => {
            debug!("could not read profile {}: {}", path, e);
            Vec::new()
        }
    }
}
