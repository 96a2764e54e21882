//! Error types for altar-core.

use thiserror::Error;

/// Result type for altar-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding backend payloads.
///
/// Field-level problems never surface here; they fall back to defaults. Only a
/// payload that is not JSON at all, or not an object, is rejected.
#[derive(Error, Debug)]
pub enum Error {
    /// The payload is not valid JSON or has the wrong top-level shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
