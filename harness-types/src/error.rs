//! Error types for harness wire parsing.

use thiserror::Error;

/// Errors that can occur while decoding coordinator responses.
#[derive(Debug, Error)]
pub enum TypesError {
    /// JSON body could not be decoded into the expected shape
    #[error("malformed body: {0}")]
    Malformed(#[source] serde_json::Error),
}
