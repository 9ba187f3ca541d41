//! Error types for docsift.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting structure or ranking documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a fragment dump or collection input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A heading pattern failed to compile.
    #[error("Invalid heading pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The collection input is structurally invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The fragment source could not supply fragments for a document.
    #[error("Fragment source error for {document}: {message}")]
    FragmentSource {
        /// Document filename as given in the collection input
        document: String,
        /// Underlying failure
        message: String,
    },

    /// The embedding backend failed to encode text.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build a fragment source error for a document.
    pub fn fragment_source(document: impl Into<String>, message: impl ToString) -> Self {
        Error::FragmentSource {
            document: document.into(),
            message: message.to_string(),
        }
    }
}
