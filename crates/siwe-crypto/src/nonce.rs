//! Random nonce generation.

use siwe_core::NonceGenerator;
use uuid::Uuid;

/// Generate a fresh nonce: a random v4 UUID in hyphenated form.
///
/// The result is 36 characters, well above the 8 character minimum, and
/// draws 122 bits from the operating system's generator.
pub fn generate_nonce() -> String {
    Uuid::new_v4().to_string()
}

/// [`NonceGenerator`] backed by [`generate_nonce`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNonce;

impl NonceGenerator for UuidNonce {
    fn generate(&self) -> String {
        generate_nonce()
    }
}
