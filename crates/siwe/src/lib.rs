//! # SIWE
//!
//! Sign-In with Ethereum (EIP-4361): create the message a wallet signs,
//! read it back, and check the signature.
//!
//! ## Overview
//!
//! - **Prepare**: turn a [`SiweMessage`] into its canonical text, filling
//!   chain id, nonce and issued-at when absent
//! - **Parse**: reconstruct a [`SiweMessage`] from canonical text
//! - **Verify**: recover the signer of the text and compare it with the
//!   claimed address
//! - **Nonces**: random, unpredictable per-message tokens
//!
//! ## Usage
//!
//! ```rust,no_run
//! use siwe::{generate_nonce, prepare_message, Siwe, SiweMessage};
//!
//! async fn example(signature: &str) -> siwe::Result<bool> {
//!     let message = SiweMessage::builder(
//!         "example.com",
//!         "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
//!         "https://example.com/login",
//!     )
//!     .statement("Sign in to Example")
//!     .nonce(generate_nonce())
//!     .build()?;
//!
//!     // Hand this text to the wallet
//!     let text = prepare_message(&message);
//!
//!     // Later, with the signature the wallet returned
//!     Siwe::default().verify(&text, signature).await
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `siwe::core` - Message model, canonical text and parser
//! - `siwe::crypto` - secp256k1 recovery, local signing and nonces

pub mod error;
pub mod siwe;

// Re-export component crates
pub use siwe_core as core;
pub use siwe_crypto as crypto;

pub use crate::error::{Result, SiweError};
pub use crate::siwe::{MessageInput, Siwe, SiweConfig, VerifyOptions};

// Re-export commonly used core types
pub use siwe_core::{
    Address, AddressError, Clock, Field, FieldError, IntoSignature, NonceGenerator, ParseError,
    RecoveryError, Signature, SignatureFormatError, SignatureRecovery, SiweMessage,
    SiweMessageBuilder, StatementPolicy, SystemClock,
};
pub use siwe_crypto::{LocalSigner, Secp256k1Recovery, UuidNonce};

/// Produce the canonical text for `message` with the default configuration.
///
/// Equivalent to `Siwe::default().prepare_message(message)`.
pub fn prepare_message(message: &SiweMessage) -> String {
    Siwe::default().prepare_message(message)
}

/// Parse canonical text into a message.
pub fn parse_message(text: &str) -> std::result::Result<SiweMessage, ParseError> {
    siwe_core::parse_message(text)
}

/// Verify a signature with the production secp256k1 backend.
pub async fn verify<'a>(
    message: impl Into<MessageInput<'a>>,
    signature: impl IntoSignature,
) -> Result<bool> {
    Siwe::default().verify(message, signature).await
}

/// Generate a random nonce.
pub fn generate_nonce() -> String {
    siwe_crypto::generate_nonce()
}
