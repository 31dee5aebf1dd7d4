//! # SIWE Crypto
//!
//! The cryptography behind Sign-In with Ethereum:
//!
//! - [`eip191`]: the `personal_sign` digest wallets sign
//! - [`recovery`]: secp256k1 public-key recovery, [`Secp256k1Recovery`]
//! - [`signer`]: [`LocalSigner`] for producing signatures locally
//! - [`nonce`]: random nonces via [`generate_nonce`]
//!
//! ## Example
//!
//! ```rust
//! use siwe_crypto::{recover_address, LocalSigner};
//!
//! let signer = LocalSigner::random();
//! let signature = signer.sign_message("hello").unwrap();
//! let recovered = recover_address(b"hello", &signature).unwrap();
//! assert_eq!(recovered, signer.address());
//! ```

pub mod eip191;
pub mod error;
pub mod nonce;
pub mod recovery;
pub mod signer;

pub use eip191::hash_personal_message;
pub use error::SignerError;
pub use nonce::{generate_nonce, UuidNonce};
pub use recovery::{address_of, recover_address, Secp256k1Recovery, SIGNATURE_LEN};
pub use signer::LocalSigner;
