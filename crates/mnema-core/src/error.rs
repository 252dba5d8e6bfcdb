// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mnema memory stream.

use thiserror::Error;

/// The primary error type used across all Mnema adapter traits and core operations.
#[derive(Debug, Error)]
pub enum MnemaError {
    /// Configuration errors (invalid TOML, missing required fields, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Embedding generation failed (provider error, network failure, empty response).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Importance calculation failed (provider error, unparsable or out-of-range score).
    #[error("importance error: {message}")]
    Importance {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text generation failed (provider error, missing response fields).
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A storage write did not complete; no partial record is visible.
    #[error("storage write error: {source}")]
    StorageWrite {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored record could not be read back (malformed or corrupt).
    #[error("storage read error: {message}")]
    StorageRead { message: String },

    /// Retrieval weights do not sum to 1.
    #[error("invalid retrieval weights: sum is {sum}, expected 1.0")]
    InvalidWeights { sum: f64 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = MnemaError::InvalidWeights { sum: 1.5 };
        assert_eq!(
            err.to_string(),
            "invalid retrieval weights: sum is 1.5, expected 1.0"
        );

        let err = MnemaError::Embedding {
            message: "connection refused".into(),
            source: None,
        };
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn storage_write_wraps_source() {
        let err = MnemaError::StorageWrite {
            source: Box::new(std::io::Error::other("disk full")),
        };
        assert!(err.to_string().contains("disk full"));
    }
}
