//! EIP-191 personal-message hashing (version `0x45`).
//!
//! Wallets sign `keccak256("\x19Ethereum Signed Message:\n" || len || message)`
//! where `len` is the decimal byte length of the message.

use siwe_core::Keccak256Hash;

/// Hash a message the way `personal_sign` does.
pub fn hash_personal_message(message: &[u8]) -> Keccak256Hash {
    Keccak256Hash(alloy_primitives::eip191_hash_message(message).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_includes_decimal_length() {
        let direct = Keccak256Hash::hash(b"\x19Ethereum Signed Message:\n11hello world");
        assert_eq!(hash_personal_message(b"hello world"), direct);
    }

    #[test]
    fn test_hello_world_digest() {
        assert_eq!(
            hash_personal_message(b"hello world").to_hex(),
            "d9eba16ed0ecae432b71fe008c98cc872bb4cc214d3220a36f365326cf807d68"
        );
    }
}
