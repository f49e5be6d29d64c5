//! Error types for the owned-handle crate.

use thiserror::Error;

/// Result type alias for handle acquisition.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for handle acquisition.
///
/// Owning and releasing a handle never fails; these errors only come out of
/// the acquisition side, before a handle is owned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Acquisition produced the null value of the handle type.
    #[error("invalid handle: acquisition returned null `{0}`")]
    InvalidHandle(&'static str),

    /// Function argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The foreign call failed with an OS error.
    #[error("I/O error: {message}")]
    Io {
        /// Error message.
        message: String,
        /// Operation that failed.
        op: Option<String>,
        /// Path involved.
        path: Option<String>,
    },
}

impl Error {
    /// Check if this is an invalid handle error.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Error::InvalidHandle(_))
    }

    /// Check if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Check if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }

    /// Build an [`Error::Io`] from the calling thread's last OS error.
    #[cfg_attr(not(unix), allow(dead_code))]
    pub(crate) fn last_os_error(op: &str, path: Option<&str>) -> Self {
        Error::Io {
            message: std::io::Error::last_os_error().to_string(),
            op: Some(op.to_string()),
            path: path.map(str::to_string),
        }
    }
}
