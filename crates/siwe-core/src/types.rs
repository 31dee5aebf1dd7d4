//! Strong type definitions for account addresses and signatures.

use std::fmt;
use std::str::FromStr;

use crate::error::{AddressError, SignatureFormatError};

/// A 20-byte Ethereum account address.
///
/// Equality is byte equality, so two spellings of the same account that
/// differ only in letter case compare equal once parsed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly 20 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let arr: [u8; 20] = slice.try_into().ok()?;
        Some(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a `0x`-prefixed hex address.
    ///
    /// All-lowercase and all-uppercase payloads are accepted as-is. A
    /// mixed-case payload is treated as EIP-55 and must carry a valid
    /// checksum.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let payload = s
            .strip_prefix("0x")
            .filter(|p| p.len() == 40 && p.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| AddressError::InvalidFormat(s.to_string()))?;

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(payload, &mut bytes)
            .map_err(|_| AddressError::InvalidFormat(s.to_string()))?;
        let address = Self(bytes);

        let has_lower = payload.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = payload.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *payload {
            return Err(AddressError::InvalidChecksum(s.to_string()));
        }

        Ok(address)
    }

    /// Render the EIP-55 mixed-case checksum form.
    pub fn to_checksum(&self) -> String {
        alloy_primitives::Address::from(self.0).to_checksum(None)
    }

    /// Derive the address owning an uncompressed secp256k1 public key.
    ///
    /// `public_key` is the 64-byte `x || y` encoding, without the SEC1 tag.
    pub fn from_public_key(public_key: &[u8; 64]) -> Self {
        Self(alloy_primitives::Address::from_raw_public_key(public_key).into())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// Raw signature bytes as supplied by the client.
///
/// Only the encoding is checked here. Whether the bytes form a usable
/// recoverable signature is decided by the recovery collaborator.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self, SignatureFormatError> {
        let body = s
            .strip_prefix("0x")
            .ok_or(SignatureFormatError::MissingPrefix)?;
        hex::decode(body)
            .map(Self)
            .map_err(|e| SignatureFormatError::InvalidHex(e.to_string()))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl FromStr for Signature {
    type Err = SignatureFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        if hex.len() > 18 {
            write!(f, "Signature({}...)", &hex[..18])
        } else {
            write!(f, "Signature({})", hex)
        }
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Anything a caller may hand over as a signature.
pub trait IntoSignature {
    /// Convert, failing when a textual form is not well-formed hex.
    fn into_signature(self) -> Result<Signature, SignatureFormatError>;
}

impl IntoSignature for Signature {
    fn into_signature(self) -> Result<Signature, SignatureFormatError> {
        Ok(self)
    }
}

impl IntoSignature for &Signature {
    fn into_signature(self) -> Result<Signature, SignatureFormatError> {
        Ok(self.clone())
    }
}

impl IntoSignature for &str {
    fn into_signature(self) -> Result<Signature, SignatureFormatError> {
        Signature::from_hex(self)
    }
}

impl IntoSignature for String {
    fn into_signature(self) -> Result<Signature, SignatureFormatError> {
        Signature::from_hex(&self)
    }
}

impl IntoSignature for &String {
    fn into_signature(self) -> Result<Signature, SignatureFormatError> {
        Signature::from_hex(self)
    }
}

impl IntoSignature for &[u8] {
    fn into_signature(self) -> Result<Signature, SignatureFormatError> {
        Ok(Signature::from_bytes(self))
    }
}
