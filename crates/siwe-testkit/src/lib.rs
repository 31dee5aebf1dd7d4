//! # SIWE Testkit
//!
//! Testing utilities for Sign-In with Ethereum.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known messages with their parsed form, malformed
//!   messages with the error they must produce, and a wallet signature
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic clocks, nonces, recovery and signers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use siwe_testkit::vectors::positive_vectors;
//!
//! for vector in positive_vectors() {
//!     let parsed = siwe_core::parse_message(vector.text).unwrap();
//!     assert_eq!(parsed, vector.message);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use siwe_testkit::generators::{message_from_params, MessageParams};
//!
//! proptest! {
//!     #[test]
//!     fn round_trip(params: MessageParams) {
//!         let message = message_from_params(&params);
//!         let text = siwe_core::canonical_text(&message).unwrap();
//!         prop_assert_eq!(siwe_core::parse_message(&text).unwrap(), message);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use siwe_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let (message, text, signature) = fixture.signed_message();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{FakeRecovery, FixedClock, FixedNonce, TestFixture};
pub use generators::{message_from_params, MessageParams};
pub use vectors::{
    negative_vectors, positive_vectors, recovery_vectors, NegativeVector, PositiveVector,
    RecoveryVector,
};
