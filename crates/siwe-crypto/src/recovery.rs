//! secp256k1 public-key recovery over EIP-191 personal messages.

use async_trait::async_trait;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use siwe_core::{Address, RecoveryError, Signature, SignatureRecovery};

use crate::eip191::hash_personal_message;

/// Length of an `r || s || v` recoverable signature.
pub const SIGNATURE_LEN: usize = 65;

/// Recover the address that signed `message` with `personal_sign`.
///
/// `v` may be given as 0/1 or in the legacy 27/28 form. High-s signatures
/// are normalized before recovery.
pub fn recover_address(message: &[u8], signature: &Signature) -> Result<Address, RecoveryError> {
    let bytes = signature.as_bytes();
    if bytes.len() != SIGNATURE_LEN {
        return Err(RecoveryError::InvalidLength(bytes.len()));
    }

    let v = bytes[64];
    let parity = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(RecoveryError::InvalidRecoveryId(other)),
    };
    let recovery_id =
        RecoveryId::from_byte(parity).ok_or(RecoveryError::InvalidRecoveryId(v))?;

    let sig = EcdsaSignature::from_slice(&bytes[..64])
        .map_err(|e| RecoveryError::InvalidSignature(e.to_string()))?;
    let (sig, recovery_id) = match sig.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (sig, recovery_id),
    };

    let digest = hash_personal_message(message);
    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|e| RecoveryError::Unrecoverable(e.to_string()))?;

    Ok(address_of(&key))
}

/// Derive the account address of a verifying key.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let mut public_key = [0u8; 64];
    // Skip the 0x04 SEC1 tag of the uncompressed encoding.
    public_key.copy_from_slice(&point.as_bytes()[1..]);
    Address::from_public_key(&public_key)
}

/// The production [`SignatureRecovery`] backed by `k256`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl Secp256k1Recovery {
    /// Create the recovery backend.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignatureRecovery for Secp256k1Recovery {
    async fn recover_address(
        &self,
        message: &str,
        signature: &Signature,
    ) -> Result<Address, RecoveryError> {
        recover_address(message.as_bytes(), signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalSigner;

    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_recovers_signer() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let signature = signer.sign_message(b"hello world").unwrap();
        let recovered = recover_address(b"hello world", &signature).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_accepts_zero_based_v() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let mut bytes = signer.sign_message(b"hello").unwrap().0;
        bytes[64] -= 27;
        let recovered = recover_address(b"hello", &Signature(bytes)).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_different_message_recovers_other_address() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let signature = signer.sign_message(b"hello").unwrap();
        let recovered = recover_address(b"goodbye", &signature);
        assert_ne!(recovered.ok(), Some(signer.address()));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = recover_address(b"hello", &Signature(vec![0u8; 64]));
        assert_eq!(result, Err(RecoveryError::InvalidLength(64)));
    }

    #[test]
    fn test_rejects_bad_recovery_id() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let mut bytes = signer.sign_message(b"hello").unwrap().0;
        bytes[64] = 35;
        let result = recover_address(b"hello", &Signature(bytes));
        assert_eq!(result, Err(RecoveryError::InvalidRecoveryId(35)));
    }

    #[test]
    fn test_rejects_zero_scalars() {
        let mut bytes = vec![0u8; 65];
        bytes[64] = 27;
        assert!(matches!(
            recover_address(b"hello", &Signature(bytes)),
            Err(RecoveryError::InvalidSignature(_))
        ));
    }

    #[tokio::test]
    async fn test_trait_delegates() {
        let signer = LocalSigner::from_hex(HARDHAT_KEY).unwrap();
        let signature = signer.sign_message(b"async").unwrap();
        let recovered = Secp256k1Recovery::new()
            .recover_address("async", &signature)
            .await
            .unwrap();
        assert_eq!(recovered, signer.address());
    }
}
