//! Error types for create-turbo
//!
//! Internal failures are modelled by [`CreateError`]. The scaffolding action
//! hands its terminal outcome to the execution controller as an
//! [`OutcomeError`], which is either a named command failure or an
//! unexpected error carrying its full detail.

use std::error::Error as _;
use std::path::PathBuf;
use thiserror::Error;

/// Internal error type for the scaffolding action and its helpers
#[derive(Error, Debug)]
pub enum CreateError {
    /// The request or a derived value failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external command could not be spawned or exited unsuccessfully
    #[error("Process error: {command} failed")]
    Process {
        command: String,
        exit_code: Option<i32>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A JSON document could not be parsed or serialized
    #[error("JSON error in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Registry lookups for the update check
    #[error("Registry error: {message}")]
    Registry {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CreateError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new process error
    pub fn process(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a new process error for a command that could not be spawned
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Process {
            command: command.into(),
            exit_code: None,
            source: Some(source),
        }
    }

    /// Create a new JSON error
    pub fn json<P: Into<PathBuf>>(path: P, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a new registry error
    pub fn registry(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::Registry {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Render the error together with its source chain
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            detail.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        detail
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CreateError>;

/// Terminal outcome of a failed scaffolding action
///
/// Constructed where the failure happens and consumed once by the
/// execution controller's failure handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// A known, named step failed
    #[error("{command} has failed.")]
    CommandFailure { command: String },

    /// An unclassified error surfaced from deeper layers
    #[error("Unexpected error: {detail}")]
    UnexpectedFailure { detail: String },
}

impl OutcomeError {
    pub fn command(command: impl Into<String>) -> Self {
        Self::CommandFailure {
            command: command.into(),
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::UnexpectedFailure {
            detail: detail.into(),
        }
    }
}

impl From<CreateError> for OutcomeError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Process { command, .. } => Self::CommandFailure { command },
            other => Self::UnexpectedFailure {
                detail: other.detail(),
            },
        }
    }
}
