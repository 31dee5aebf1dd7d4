//! Error types for the SIWE core.

use thiserror::Error;

use crate::message::Field;

/// An account address failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must be 0x followed by 40 hex characters, got {0:?}")]
    InvalidFormat(String),

    #[error("address {0} has an invalid EIP-55 checksum")]
    InvalidChecksum(String),
}

/// A signature is not a well-formed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFormatError {
    #[error("signature must be a hex string starting with 0x")]
    MissingPrefix,

    #[error("signature must be a hex string: {0}")]
    InvalidHex(String),
}

/// A single field holds a value the message grammar does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("domain {0:?} is not an RFC 4501 authority")]
    InvalidDomain(String),

    #[error("missing required field: {0}")]
    MissingField(Field),

    #[error("invalid date in {field}: {value:?}")]
    InvalidDate { field: Field, value: String },

    #[error("nonce must be at least 8 characters, got {0}")]
    NonceTooShort(usize),

    #[error("version must be 1, got {0:?}")]
    UnsupportedVersion(String),

    #[error("invalid chain id: {0:?}")]
    InvalidChainId(String),

    #[error("statement must not contain line breaks")]
    InvalidStatement,
}

/// Errors raised while parsing canonical message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("message is empty")]
    Empty,

    #[error("malformed header: {0:?}")]
    MalformedHeader(String),

    #[error("missing address line")]
    MissingAddress,

    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("unexpected line {line:?}, expected {expected}")]
    UnexpectedLine { line: String, expected: &'static str },

    #[error("duplicate field: {0}")]
    DuplicateField(Field),

    #[error("statement must be a single line")]
    MultilineStatement,

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// The recovery collaborator could not produce an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("signature must be 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("no public key recoverable from signature: {0}")]
    Unrecoverable(String),
}
