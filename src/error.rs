//! Error types for ml-logwriter
//!
//! Every filesystem failure is returned to the caller; nothing in the crate
//! terminates the process.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ml-logwriter error types
#[derive(Error, Debug)]
pub enum Error {
    /// A run directory with this name already exists under the root
    #[error("Directory already exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    /// Keyed artifacts are never overwritten
    #[error("Artifact already logged: {}\nRefusing to overwrite an existing entry", path.display())]
    AlreadyLogged {
        /// Existing file that blocked the write
        path: PathBuf,
    },

    /// Caller input failed validation (the only recoverable error)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Name cannot be used as a single path component
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// `log_*` called before `create` or `load`
    #[error("No active run: call create() or load() first")]
    NoActiveRun,

    /// IO error on a known path
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Value or model encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Dataset encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Graph could not be drawn
    #[error("Plot error: {0}")]
    Plot(String),

    /// Graph encoding failed
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Logger configuration cannot be used
    #[error("Invalid logger configuration: {0}")]
    InvalidConfig(String),

    /// A process-wide logger is already installed
    #[error("A global logger is already installed")]
    LoggerInstalled,
}

impl Error {
    /// Attach a path to an IO error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the caller can reasonably carry on logging after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
