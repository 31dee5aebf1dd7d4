//! Local secp256k1 signing keys.
//!
//! Used by tests and tooling to produce the signatures a wallet would; the
//! verifier itself only ever recovers.

use k256::ecdsa::SigningKey;
use siwe_core::{Address, Signature};

use crate::eip191::hash_personal_message;
use crate::error::{Result, SignerError};
use crate::recovery::address_of;

/// A secp256k1 private key that signs EIP-191 personal messages.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    /// Load a signer from raw private key bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let key = SigningKey::from_slice(bytes).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self::from_key(key))
    }

    /// Load a signer from a hex private key, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| SignerError::InvalidKey(format!("expected 32 bytes, got {}", v.len())))?;
        Self::from_bytes(&bytes)
    }

    /// Generate a fresh random signer.
    pub fn random() -> Self {
        Self::from_key(SigningKey::random(&mut rand::thread_rng()))
    }

    fn from_key(key: SigningKey) -> Self {
        let address = address_of(key.verifying_key());
        Self { key, address }
    }

    /// The account address of this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign `message` as `personal_sign` would, producing `r || s || v`
    /// with `v` in the 27/28 form.
    pub fn sign_message(&self, message: impl AsRef<[u8]>) -> Result<Signature> {
        let digest = hash_personal_message(message.as_ref());
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|e| SignerError::SigningError(e.to_string()))?;

        let mut bytes = Vec::with_capacity(65);
        bytes.extend_from_slice(&sig.to_bytes());
        bytes.push(recovery_id.to_byte() + 27);
        Ok(Signature(bytes))
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
