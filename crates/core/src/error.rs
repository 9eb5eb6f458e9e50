//! Error types for the subset pipeline.

use std::path::PathBuf;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pipeline was configured inconsistently.
    #[error("{0}")]
    Usage(String),

    /// A required input path does not exist.
    #[error("{what} not found: {path}")]
    NotFound { what: &'static str, path: PathBuf },

    /// An input path exists but could not be inspected or walked.
    #[error("Failed to read input path '{path}': {source}")]
    Collect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A directory path cannot be turned into a search pattern.
    #[error("Input path '{path}' is not valid UTF-8")]
    InvalidPath { path: PathBuf },

    /// Failed to read the source font.
    #[error("Failed to read font '{path}': {source}")]
    ReadFont {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document could not be read while collecting characters.
    #[error("Failed to read document '{path}': {source}")]
    Extraction {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The subsetting capability failed (corrupt font, encoding failure).
    #[error("Font subsetting failed: {message}")]
    Subset { message: String },

    /// Failed to create the output directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the subset font.
    #[error("Failed to write font '{path}': {source}")]
    WriteFont {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document could not be read or rewritten while patching.
    #[error("Failed to update document '{path}': {source}")]
    Patch {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn subset(err: anyhow::Error) -> Self {
        Self::Subset { message: format!("{err:#}") }
    }
}
