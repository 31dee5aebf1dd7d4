//! Test fixtures and helpers.
//!
//! Deterministic stand-ins for the clock, the nonce source and signature
//! recovery, plus a fixture that signs messages with a well-known key.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use siwe_core::{
    Address, Clock, Defaults, NonceGenerator, RecoveryError, Signature, SignatureRecovery,
    SiweMessage, StatementPolicy,
};
use siwe_crypto::LocalSigner;

/// Private key of the first account of the standard development mnemonic.
pub const HARDHAT_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Checksummed address of [`HARDHAT_KEY_0`].
pub const HARDHAT_ADDRESS_0: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Checksummed address of the second development account.
pub const HARDHAT_ADDRESS_1: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at the given UTC instant.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(2000, 2, 1, 13, 0, 0)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A nonce source that always yields the same nonce.
#[derive(Debug, Clone)]
pub struct FixedNonce(pub String);

impl Default for FixedNonce {
    fn default() -> Self {
        Self("e4fc0ce5-aa83-4623-b193-98f6d30c9bb1".to_string())
    }
}

impl NonceGenerator for FixedNonce {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// A recovery backend with a scripted answer that counts its calls.
#[derive(Debug)]
pub struct FakeRecovery {
    result: Result<Address, RecoveryError>,
    calls: AtomicUsize,
    last_message: Mutex<Option<String>>,
}

impl FakeRecovery {
    /// Recover every signature to `address`.
    pub fn returning(address: Address) -> Self {
        Self::with_result(Ok(address))
    }

    /// Fail every recovery with `error`.
    pub fn failing(error: RecoveryError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<Address, RecoveryError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        }
    }

    /// How many times recovery was attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The text passed to the most recent recovery.
    pub fn last_message(&self) -> Option<String> {
        self.last_message.lock().ok().and_then(|m| m.clone())
    }
}

#[async_trait]
impl SignatureRecovery for FakeRecovery {
    async fn recover_address(
        &self,
        message: &str,
        _signature: &Signature,
    ) -> Result<Address, RecoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_message.lock() {
            *last = Some(message.to_string());
        }
        self.result.clone()
    }
}

/// A signer with a deterministic clock and nonce.
pub struct TestFixture {
    pub signer: LocalSigner,
    pub clock: FixedClock,
    pub nonce: FixedNonce,
}

impl TestFixture {
    /// Create a fixture around the first development account.
    pub fn new() -> Self {
        Self::with_key(HARDHAT_KEY_0)
    }

    /// Create a fixture around a hex private key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not a valid secp256k1 scalar.
    pub fn with_key(key: &str) -> Self {
        Self {
            signer: LocalSigner::from_hex(key).expect("fixture key must be valid"),
            clock: FixedClock::default(),
            nonce: FixedNonce::default(),
        }
    }

    /// Create a fixture with a fresh random key.
    pub fn random() -> Self {
        Self {
            signer: LocalSigner::random(),
            clock: FixedClock::default(),
            nonce: FixedNonce::default(),
        }
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Serialization defaults backed by the fixture's clock and nonce.
    pub fn defaults(&self) -> Defaults<'_> {
        Defaults {
            chain_id: 1,
            statement: StatementPolicy::Omit,
            nonce: &self.nonce,
            clock: &self.clock,
        }
    }

    /// A complete message for the signer's address.
    pub fn message(&self) -> SiweMessage {
        SiweMessage {
            domain: "example.com".into(),
            address: self.address().to_checksum(),
            statement: Some("I accept the ExampleOrg Terms of Service".into()),
            uri: "https://example.com/login".into(),
            version: "1".into(),
            chain_id: Some(1),
            nonce: Some("32891756aa5c".into()),
            issued_at: Some("2021-09-30T16:25:24.000Z".into()),
            resources: Some(vec![
                "ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq/".into(),
                "https://example.com/my-web2-claim.json".into(),
            ]),
            ..SiweMessage::default()
        }
    }

    /// Render `message` with the fixture's defaults.
    pub fn prepare(&self, message: &SiweMessage) -> String {
        siwe_core::prepare_message(message, &self.defaults())
    }

    /// Sign `text` as the fixture's wallet.
    ///
    /// # Panics
    ///
    /// Panics if signing fails.
    pub fn sign(&self, text: &str) -> Signature {
        self.signer.sign_message(text).expect("signing must succeed")
    }

    /// A complete message, its canonical text and the wallet's signature.
    pub fn signed_message(&self) -> (SiweMessage, String, Signature) {
        let message = self.message();
        let text = self.prepare(&message);
        let signature = self.sign(&text);
        (message, text, signature)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
