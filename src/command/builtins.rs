//! Built-in slash commands.
//!
//! Every command is registered statically at startup by
//! [`builtin_registry`]; there is no runtime plugin discovery.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::registry::{CommandOutcome, CommandRegistry, SlashCommand};
use crate::complete::keyword_categories;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::output::{OutputSink, Tag};
use crate::shell::ShellExecutor;

/// Build the registry of built-in commands.
///
/// # Arguments
/// * `shell` - Shell collaborator used by commands that shell out
pub fn builtin_registry(shell: Arc<dyn ShellExecutor>) -> CommandRegistry {
    let commands: Vec<Arc<dyn SlashCommand>> = vec![
        Arc::new(ClearCommand),
        Arc::new(QuitCommand),
        Arc::new(ListCommand::new(Arc::clone(&shell))),
        Arc::new(FindPackCommand::new(Arc::clone(&shell))),
        Arc::new(CreateCommand::new(shell)),
        Arc::new(AnalyzeCommand::new()),
        Arc::new(SummaryCommand::new()),
        Arc::new(InstructCommand::new()),
    ];

    // Help lists every command including itself, so its entry table is
    // collected before registration.
    let mut entries: Vec<(String, String)> = commands
        .iter()
        .map(|c| (c.name().to_string(), c.describe().to_string()))
        .collect();
    let help = HelpCommand::default();
    entries.push((help.name().to_string(), help.describe().to_string()));
    entries.sort();

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(HelpCommand { entries }));
    for command in commands {
        registry.register(command);
    }
    registry
}

/// `/help` - list commands and completion keyword categories.
#[derive(Default)]
struct HelpCommand {
    entries: Vec<(String, String)>,
}

#[async_trait]
impl SlashCommand for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn describe(&self) -> &str {
        "Show available commands and completion keywords"
    }

    async fn execute(&self, _args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        sink.append(Tag::Info, "Available commands:");
        for (name, description) in &self.entries {
            sink.append(Tag::Output, &format!("  /{name} - {description}"));
        }
        sink.append(Tag::Info, "Completion keywords (press Tab to cycle):");
        for (label, commands) in keyword_categories() {
            sink.append(Tag::Output, &format!("  {label}: {}", commands.join(", ")));
        }
        Ok(CommandOutcome::Continue)
    }
}

/// `/clear` - wipe the output area.
struct ClearCommand;

#[async_trait]
impl SlashCommand for ClearCommand {
    fn name(&self) -> &str {
        "clear"
    }

    fn describe(&self) -> &str {
        "Clear the screen"
    }

    async fn execute(&self, _args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        sink.clear();
        Ok(CommandOutcome::Continue)
    }
}

/// `/quit` - signal session termination.
///
/// The command only signals; the host loop does the actual teardown.
struct QuitCommand;

#[async_trait]
impl SlashCommand for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn describe(&self) -> &str {
        "Exit the session"
    }

    async fn execute(&self, _args: &[String], _sink: &dyn OutputSink) -> Result<CommandOutcome> {
        Ok(CommandOutcome::Exit)
    }
}

/// `/list` - show installed top-level packages.
struct ListCommand {
    shell: Arc<dyn ShellExecutor>,
}

impl ListCommand {
    fn new(shell: Arc<dyn ShellExecutor>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl SlashCommand for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn describe(&self) -> &str {
        "List installed packages (npm list --depth=0)"
    }

    async fn execute(&self, _args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        let output = self.shell.run("npm list --depth=0").await?;
        report_shell_output(&output.stdout, &output.stderr, sink);
        Ok(CommandOutcome::Continue)
    }
}

/// `/findpack` - search the npm registry for a package.
struct FindPackCommand {
    shell: Arc<dyn ShellExecutor>,
}

impl FindPackCommand {
    fn new(shell: Arc<dyn ShellExecutor>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl SlashCommand for FindPackCommand {
    fn name(&self) -> &str {
        "findpack"
    }

    fn describe(&self) -> &str {
        "Search the npm registry for a package"
    }

    async fn execute(&self, args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        let Some(term) = args.first() else {
            sink.append(Tag::Warning, "Usage: /findpack <package-name>");
            return Ok(CommandOutcome::Continue);
        };

        sink.append(Tag::Info, &format!("Searching npm for '{term}'..."));
        let output = self.shell.run(&format!("npm search {term}")).await?;
        report_shell_output(&output.stdout, &output.stderr, sink);
        Ok(CommandOutcome::Continue)
    }
}

const PRETTIER_CONFIG: &str = r"module.exports = {
    semi: true,
    trailingComma: 'all',
    singleQuote: true,
    printWidth: 120,
    tabWidth: 4,
}
";

const PRETTIER_IGNORE: &str = "node_modules\ndist\n";

const TSCONFIG: &str = r#"{
    "compilerOptions": {
        "target": "es2020",
        "module": "commonjs",
        "strict": true,
        "esModuleInterop": true,
        "skipLibCheck": true,
        "forceConsistentCasingInFileNames": true
    }
}
"#;

/// `/create` - scaffold common project files.
///
/// License and ESLint setup shell out to npx/npm; Prettier and tsconfig
/// targets are written directly.
struct CreateCommand {
    shell: Arc<dyn ShellExecutor>,
    dir: Option<PathBuf>,
}

impl CreateCommand {
    fn new(shell: Arc<dyn ShellExecutor>) -> Self {
        Self { shell, dir: None }
    }

    #[cfg(test)]
    fn rooted(shell: Arc<dyn ShellExecutor>, dir: PathBuf) -> Self {
        Self {
            shell,
            dir: Some(dir),
        }
    }
}

#[async_trait]
impl SlashCommand for CreateCommand {
    fn name(&self) -> &str {
        "create"
    }

    fn describe(&self) -> &str {
        "Create project files (license, eslint, prettier, tsconfig)"
    }

    async fn execute(&self, args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        let dir = working_dir(&self.dir);
        match args.first().map(String::as_str) {
            Some("license") => {
                sink.append(Tag::Info, "Creating license...");
                let output = self.shell.run("npx create-license -o LICENSE").await?;
                report_shell_output(&output.stdout, &output.stderr, sink);
                sink.append(Tag::Success, "Created LICENSE");
            }
            Some("eslint") => {
                sink.append(Tag::Info, "Setting up ESLint...");
                let output = self.shell.run("npm init @eslint/config").await?;
                report_shell_output(&output.stdout, &output.stderr, sink);
            }
            Some("prettier") => {
                tokio::fs::write(dir.join(".prettierrc.cjs"), PRETTIER_CONFIG).await?;
                tokio::fs::write(dir.join(".prettierignore"), PRETTIER_IGNORE).await?;
                sink.append(Tag::Success, "Created .prettierrc.cjs and .prettierignore");
            }
            Some("tsconfig") => {
                tokio::fs::write(dir.join("tsconfig.json"), TSCONFIG).await?;
                sink.append(Tag::Success, "Created tsconfig.json");
            }
            _ => {
                sink.append(
                    Tag::Warning,
                    "Usage: /create <license|eslint|prettier|tsconfig>",
                );
            }
        }
        Ok(CommandOutcome::Continue)
    }
}

/// `/analyze` - generate a README from the project manifest.
struct AnalyzeCommand {
    dir: Option<PathBuf>,
}

impl AnalyzeCommand {
    fn new() -> Self {
        Self { dir: None }
    }

    #[cfg(test)]
    fn rooted(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }
}

#[async_trait]
impl SlashCommand for AnalyzeCommand {
    fn name(&self) -> &str {
        "analyze"
    }

    fn describe(&self) -> &str {
        "Generate README.md from package.json"
    }

    async fn execute(&self, _args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        let dir = working_dir(&self.dir);
        let manifest = Manifest::load(&dir).await;
        if manifest.is_empty() {
            sink.append(Tag::Warning, "No package.json found in the current directory");
            return Ok(CommandOutcome::Continue);
        }

        let path = dir.join("README.md");
        tokio::fs::write(&path, render_readme(&manifest)).await?;
        info!("wrote {}", path.display());
        sink.append(Tag::Success, "Generated README.md");
        Ok(CommandOutcome::Continue)
    }
}

/// `/summary` - generate a project summary document.
struct SummaryCommand {
    dir: Option<PathBuf>,
}

impl SummaryCommand {
    fn new() -> Self {
        Self { dir: None }
    }

    #[cfg(test)]
    fn rooted(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }
}

#[async_trait]
impl SlashCommand for SummaryCommand {
    fn name(&self) -> &str {
        "summary"
    }

    fn describe(&self) -> &str {
        "Generate docs/Summary.md from package.json"
    }

    async fn execute(&self, _args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        let dir = working_dir(&self.dir);
        let manifest = Manifest::load(&dir).await;
        if manifest.is_empty() {
            sink.append(Tag::Warning, "No package.json found in the current directory");
            return Ok(CommandOutcome::Continue);
        }

        let docs = dir.join("docs");
        tokio::fs::create_dir_all(&docs).await?;
        let path = docs.join("Summary.md");
        tokio::fs::write(&path, render_summary(&manifest)).await?;
        sink.append(Tag::Success, "Generated docs/Summary.md");
        Ok(CommandOutcome::Continue)
    }
}

/// `/instruct` - write a quick-reference guide file.
struct InstructCommand {
    dir: Option<PathBuf>,
}

impl InstructCommand {
    fn new() -> Self {
        Self { dir: None }
    }

    #[cfg(test)]
    fn rooted(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }
}

#[async_trait]
impl SlashCommand for InstructCommand {
    fn name(&self) -> &str {
        "instruct"
    }

    fn describe(&self) -> &str {
        "Write a quick-reference guide (apsh-guide.md)"
    }

    async fn execute(&self, _args: &[String], sink: &dyn OutputSink) -> Result<CommandOutcome> {
        let path = working_dir(&self.dir).join("apsh-guide.md");
        tokio::fs::write(&path, render_guide()).await?;
        sink.append(Tag::Success, "Generated apsh-guide.md");
        Ok(CommandOutcome::Continue)
    }
}

fn working_dir(dir: &Option<PathBuf>) -> PathBuf {
    match dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn report_shell_output(stdout: &str, stderr: &str, sink: &dyn OutputSink) {
    let stdout = stdout.trim_end();
    if !stdout.is_empty() {
        sink.append(Tag::Output, stdout);
    }
    let stderr = stderr.trim_end();
    if !stderr.is_empty() {
        sink.append(Tag::Warning, stderr);
    }
}

fn render_readme(manifest: &Manifest) -> String {
    let name = manifest.name.as_deref().unwrap_or("Untitled project");
    let mut out = format!("# {name}\n\n");
    if let Some(description) = &manifest.description {
        out.push_str(description);
        out.push_str("\n\n");
    }

    if !manifest.scripts.is_empty() {
        out.push_str("## Scripts\n\n");
        for (script, body) in &manifest.scripts {
            out.push_str(&format!("- `npm run {script}` - `{body}`\n"));
        }
        out.push('\n');
    }

    if !manifest.dependencies.is_empty() {
        out.push_str("## Dependencies\n\n");
        for (package, version) in &manifest.dependencies {
            out.push_str(&format!("- {package} {version}\n"));
        }
        out.push('\n');
    }

    if !manifest.dev_dependencies.is_empty() {
        out.push_str("## Dev Dependencies\n\n");
        for (package, version) in &manifest.dev_dependencies {
            out.push_str(&format!("- {package} {version}\n"));
        }
        out.push('\n');
    }

    out
}

fn render_summary(manifest: &Manifest) -> String {
    let name = manifest.name.as_deref().unwrap_or("Untitled project");
    let mut out = format!("# Summary: {name}\n\n");
    if let Some(description) = &manifest.description {
        out.push_str(&format!("{description}\n\n"));
    }
    out.push_str(&format!(
        "- Scripts: {}\n- Dependencies: {}\n- Dev dependencies: {}\n",
        manifest.scripts.len(),
        manifest.dependencies.len(),
        manifest.dev_dependencies.len(),
    ));
    out
}

fn render_guide() -> String {
    let mut out = String::from("# apsh quick reference\n\n## Slash commands\n\n");
    out.push_str("Type `/help` inside apsh for the full command list.\n\n");
    out.push_str("## Completion keywords\n\n");
    for (label, commands) in keyword_categories() {
        out.push_str(&format!("### {label}\n\n"));
        for command in commands {
            out.push_str(&format!("- `{command}`\n"));
        }
        out.push('\n');
    }
    out.push_str("Anything that is not a slash command is forwarded to the host shell.\n");
    out
}
