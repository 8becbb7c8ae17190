//! Tally error types.
//!
//! The counter and tokenizer never fail. Every error originates in the layers
//! around them:
//!
//! - **Configuration**: split mode or numeric parameters rejected before any
//!   input is read
//! - **Source access**: a file could not be opened, stat'ed or read, or
//!   standard input failed mid-scan
//! - **Encoding**: the selection could not be serialized to the requested
//!   output format
//!
//! The `Source` variant keeps the underlying `io::Error` as its `#[source]`,
//! so `anyhow` can print the complete chain.

use std::io;

use thiserror::Error;

/// Tally errors.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Invalid split mode, query parameter, environment value or config file.
    #[error("Config error: {0}")]
    Config(String),

    /// A source could not be opened, stat'ed or read.
    #[error("error {action} {path:?}")]
    Source {
        /// What was being attempted (`"opening"`, `"stating"`, `"reading"`).
        action: &'static str,
        /// Source identifier as given on the command line.
        path: String,
        /// Underlying I/O failure.
        #[source]
        error: io::Error,
    },

    /// Serialization of the selection failed.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// I/O error outside source scanning.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TallyError {
    /// Build a source-access error.
    pub fn source_access(action: &'static str, path: impl Into<String>, error: io::Error) -> Self {
        TallyError::Source {
            action,
            path: path.into(),
            error,
        }
    }

    /// True for errors that `--skip-errors` is allowed to suppress.
    pub fn is_source(&self) -> bool {
        matches!(self, TallyError::Source { .. })
    }
}

/// Result type alias for tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

impl From<toml::de::Error> for TallyError {
    fn from(err: toml::de::Error) -> Self {
        TallyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        TallyError::Encoding(format!("error marshaling object to JSON: {err}"))
    }
}

impl From<serde_yaml::Error> for TallyError {
    fn from(err: serde_yaml::Error) -> Self {
        TallyError::Encoding(format!("error marshaling object to YAML: {err}"))
    }
}
