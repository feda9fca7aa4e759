//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for every failure; success is 0.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// The ssh config text could not be turned into host blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected `<Parameter> <value>`")]
    MalformedLine { line: usize },

    #[error("line {line}: block does not start with a Host entry")]
    MissingHost { line: usize },
}

/// Failures of in-memory store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Host {0} does not exist")]
    HostNotFound(String),

    #[error("{0}: Host cannot be unset")]
    CannotUnsetHost(String),

    #[error("Invalid value '{value}' for {param}: must be a single word")]
    InvalidValue { param: String, value: String },
}

#[derive(Debug, Error)]
pub enum SshcError {
    #[error("Could not open {} file", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Host '{host}' not found.{}", suggestion_suffix(suggestion))]
    HostNotFound {
        host: String,
        suggestion: Option<String>,
    },

    #[error("Host {0} already exists")]
    HostAlreadyExists(String),

    #[error("Parameter '{parameter}' is not valid, valid parameters are: {valid}")]
    InvalidParameter { parameter: String, valid: String },

    #[error("Invalid user@host: {0}")]
    InvalidUserHost(String),

    #[error("Need {} arguments ({})", names.len(), names.join(", "))]
    InsufficientArguments { names: Vec<&'static str> },

    #[error("Command '{0}' not found")]
    UnknownCommand(String),

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Invalid settings file {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode output")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" Did you mean '{s}'?"))
        .unwrap_or_default()
}

impl SshcError {
    /// Errors whose message is meant for the user as-is.
    ///
    /// Everything else is reported as an opaque "Error executing command".
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            SshcError::Write { .. } | SshcError::Json(_) | SshcError::Output(_)
        )
    }

    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }
}
