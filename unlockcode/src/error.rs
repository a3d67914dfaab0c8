//! Error types for unlock-code setup.
//!
//! Derivation and validation never fail; a bad candidate is just `false`.
//! Only configuration problems detected at setup surface as errors.

use thiserror::Error;

/// Setup-time errors.
#[derive(Debug, Error)]
pub enum UnlockError {
    /// The data source reported an unusable code length.
    #[error("invalid code length: {0} (must be at least 1)")]
    InvalidCodeLength(usize),

    /// Lock-state (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for unlock-code operations.
pub type UnlockResult<T> = Result<T, UnlockError>;
