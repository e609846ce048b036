//! Error types for pagekit
//!
//! The engine surfaces loader failures verbatim: a failed `load_page`
//! terminates the response stream with the error it returned. There is no
//! implicit retry; resuming pagination requires a fresh engine.

use thiserror::Error;

/// The main error type for pagekit
#[derive(Error, Debug)]
pub enum Error {
    /// A page fetch failed with a plain message
    #[error("Page fetch failed: {message}")]
    Fetch { message: String },

    /// A page fetch failed with an arbitrary caller-supplied error,
    /// passed through unmodified
    #[error(transparent)]
    PageLoad(#[from] anyhow::Error),

    /// The engine was cancelled while a fetch was outstanding
    #[error("Pagination cancelled")]
    Cancelled,
}

impl Error {
    /// Create a fetch error from a message
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Check if this error came from a failed page load
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::PageLoad(_))
    }
}

/// Result type alias for pagekit
pub type Result<T> = std::result::Result<T, Error>;
