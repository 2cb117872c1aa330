use std::{fmt, io};

/// Crate-wide `Result` type using [`ApshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ApshError>;

/// Top-level error type for apsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum ApshError {
    /// Errors from the spawned host shell.
    Shell(ShellError),

    /// Slash command errors.
    Command(CommandError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors raised while invoking the external shell collaborator.
#[derive(Debug)]
pub enum ShellError {
    /// The shell process could not be spawned.
    SpawnFailed(String),

    /// The shell produced output that is not valid UTF-8.
    InvalidOutput(String),

    /// The shell process was terminated before producing output.
    Terminated(String),
}

/// Errors raised by local slash command handlers.
#[derive(Debug)]
pub enum CommandError {
    /// The command was invoked with unusable arguments.
    Usage(String),

    /// The handler started but could not finish its work.
    Failed(String),

    /// A previous dispatch is still in flight.
    Busy,
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ApshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApshError::Shell(e) => write!(f, "Shell error: {e}"),
            ApshError::Command(e) => write!(f, "{e}"),
            ApshError::Config(e) => write!(f, "Configuration error: {e}"),
            ApshError::Io(e) => write!(f, "I/O error: {e}"),
            ApshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::SpawnFailed(msg) => write!(f, "Failed to start shell: {msg}"),
            ShellError::InvalidOutput(msg) => write!(f, "Unreadable shell output: {msg}"),
            ShellError::Terminated(msg) => write!(f, "Shell terminated: {msg}"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(msg) => write!(f, "{msg}"),
            CommandError::Failed(msg) => write!(f, "{msg}"),
            CommandError::Busy => write!(f, "A command is still running"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for ApshError {}
impl std::error::Error for ShellError {}
impl std::error::Error for CommandError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to ApshError ========================= */

impl From<io::Error> for ApshError {
    fn from(err: io::Error) -> Self {
        ApshError::Io(err)
    }
}

impl From<ShellError> for ApshError {
    fn from(err: ShellError) -> Self {
        ApshError::Shell(err)
    }
}

impl From<CommandError> for ApshError {
    fn from(err: CommandError) -> Self {
        ApshError::Command(err)
    }
}

impl From<ConfigError> for ApshError {
    fn from(err: ConfigError) -> Self {
        ApshError::Config(err)
    }
}

impl From<String> for ApshError {
    fn from(msg: String) -> Self {
        ApshError::Generic(msg)
    }
}

impl From<&str> for ApshError {
    fn from(msg: &str) -> Self {
        ApshError::Generic(msg.to_owned())
    }
}

impl From<toml::de::Error> for ApshError {
    fn from(err: toml::de::Error) -> Self {
        ApshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}
