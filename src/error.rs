//! Error types for the card rendering engine

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving assets or exporting cards
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to fetch or decode an image asset
    #[error("Failed to load image: {0}")]
    Load(String),

    /// Failed to read a local file (upload path)
    #[error("Could not read file: {0}")]
    Read(String),

    /// Failed to export a surface (nothing rendered yet, or encoding failed)
    #[error("Export failed: {0}")]
    Export(String),

    /// Invalid render parameters, rejected at the validation boundary
    #[error("Invalid parameters: {0}")]
    Config(String),
}
