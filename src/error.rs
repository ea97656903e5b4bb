use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Every variant is fatal: the main loop releases the terminal, prints the
/// error and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or filesystem calls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The current directory could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selected path could not be copied to the clipboard.
    #[error("Failed to copy selection to clipboard: {0}")]
    Clipboard(String),
}
