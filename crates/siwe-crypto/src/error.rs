//! Error types for the crypto module.

use thiserror::Error;

/// Errors that can occur while loading or using a local signing key.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The private key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Signing failed.
    #[error("signing error: {0}")]
    SigningError(String),
}

/// Result type for signer operations.
pub type Result<T> = std::result::Result<T, SignerError>;
