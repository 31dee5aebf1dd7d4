//! Error types for sign-in operations.

use siwe_core::{AddressError, FieldError, ParseError, RecoveryError, SignatureFormatError};
use siwe_crypto::SignerError;
use thiserror::Error;

/// Errors that can occur while verifying a sign-in message.
///
/// A signature that is well formed but was made by a different account is
/// not an error; [`crate::Siwe::verify`] returns `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum SiweError {
    /// The message text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A message field is invalid.
    #[error("invalid field: {0}")]
    Field(#[from] FieldError),

    /// The claimed address is not a valid account address.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The signature is not a `0x` hex string.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureFormatError),

    /// The signature could not be recovered to a public key.
    #[error("recovery error: {0}")]
    Recovery(#[from] RecoveryError),

    /// Local signing failed.
    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    /// The message was issued for another domain.
    #[error("domain mismatch: expected {expected}, found {found}")]
    DomainMismatch { expected: String, found: String },

    /// The message carries a different nonce than the one handed out.
    #[error("nonce mismatch: expected {expected}, found {found}")]
    NonceMismatch { expected: String, found: String },

    /// The expiration time has passed.
    #[error("message expired at {0}")]
    Expired(String),

    /// The not-before time is still in the future.
    #[error("message not valid before {0}")]
    NotYetValid(String),
}

/// Result type for sign-in operations.
pub type Result<T> = std::result::Result<T, SiweError>;
