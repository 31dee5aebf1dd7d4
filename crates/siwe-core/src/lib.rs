//! # SIWE Core
//!
//! Pure primitives for Sign-In with Ethereum (EIP-4361): the message model,
//! its canonical text encoding, and the parser that reads it back.
//!
//! This crate contains no I/O and no elliptic-curve code. Nonce generation,
//! the clock and signature recovery are capability traits (see [`traits`])
//! implemented elsewhere.
//!
//! ## Key Types
//!
//! - [`SiweMessage`] - The structured sign-in message
//! - [`Address`] - A 20-byte account address with EIP-55 checksums
//! - [`Signature`] - Raw signature bytes as supplied by a client
//! - [`Field`] - The message fields and their keys in the text form
//!
//! ## Canonical Text
//!
//! The exact text that gets signed is produced by [`canonical`] and read back
//! by [`parser`]. Both follow one line grammar.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod message;
pub mod parser;
pub mod traits;
pub mod types;
pub mod validation;

pub use canonical::{canonical_text, complete, prepare_message, Defaults, StatementPolicy};
pub use crypto::Keccak256Hash;
pub use error::{AddressError, FieldError, ParseError, RecoveryError, SignatureFormatError};
pub use message::{Field, SiweMessage, SiweMessageBuilder};
pub use parser::parse_message;
pub use traits::{Clock, NonceGenerator, SignatureRecovery, SystemClock};
pub use types::{Address, IntoSignature, Signature};
