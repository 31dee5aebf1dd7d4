//! End-to-end verification against real and fake recovery backends.

use std::sync::Arc;

use siwe::{
    prepare_message, verify, Address, AddressError, RecoveryError, SignatureFormatError, Siwe,
    SiweConfig, SiweError, SiweMessage,
};
use siwe_testkit::fixtures::{HARDHAT_ADDRESS_0, HARDHAT_ADDRESS_1};
use siwe_testkit::{recovery_vectors, FakeRecovery, FixedClock, FixedNonce, TestFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn fake_siwe(recovery: FakeRecovery) -> (Siwe<Arc<FakeRecovery>>, Arc<FakeRecovery>) {
    let recovery = Arc::new(recovery);
    let siwe = Siwe::new(Arc::clone(&recovery), SiweConfig::default())
        .with_nonce_generator(FixedNonce::default())
        .with_clock(FixedClock::default());
    (siwe, recovery)
}

#[tokio::test]
async fn test_hardhat_signature_verifies() {
    init_tracing();
    let fixture = TestFixture::new();
    let (message, text, signature) = fixture.signed_message();
    assert_eq!(message.address, HARDHAT_ADDRESS_0);

    assert!(verify(&message, &signature).await.unwrap());
    assert!(verify(&text, signature.to_hex()).await.unwrap());
}

#[tokio::test]
async fn test_wallet_vector_verifies_as_text() {
    for vector in recovery_vectors() {
        assert!(
            verify(vector.message, vector.signature).await.unwrap(),
            "{}",
            vector.name
        );
    }
}

#[tokio::test]
async fn test_truncated_signature_is_format_error() {
    let fixture = TestFixture::new();
    let (message, _, signature) = fixture.signed_message();
    let hex = signature.to_hex();

    let result = verify(&message, &hex[1..]).await;
    assert!(matches!(
        result,
        Err(SiweError::InvalidSignature(SignatureFormatError::MissingPrefix))
    ));

    let result = verify(&message, &hex[..hex.len() - 1]).await;
    assert!(matches!(
        result,
        Err(SiweError::InvalidSignature(SignatureFormatError::InvalidHex(_)))
    ));
}

#[tokio::test]
async fn test_invalid_address_fails_before_recovery() {
    let (siwe, recovery) = fake_siwe(FakeRecovery::returning(Address::ZERO));
    let mut message = TestFixture::new().message();
    message.address = "10x".into();

    let result = siwe.verify(&message, "0x00").await;
    assert!(matches!(
        result,
        Err(SiweError::InvalidAddress(AddressError::InvalidFormat(_)))
    ));
    assert_eq!(recovery.calls(), 0);
}

fn short_nonce_message() -> SiweMessage {
    SiweMessage {
        domain: "example.com".into(),
        address: HARDHAT_ADDRESS_0.into(),
        uri: "https://example.com".into(),
        version: "1".into(),
        chain_id: Some(1),
        nonce: Some("123".into()),
        issued_at: Some("2024-04-19T00:46:43Z".into()),
        ..SiweMessage::default()
    }
}

#[tokio::test]
async fn test_short_nonce_message_verifies_as_model_and_text() {
    init_tracing();
    let fixture = TestFixture::new();
    let message = short_nonce_message();
    let text = prepare_message(&message);
    assert!(text.contains("\nNonce: 123\nIssued At: 2024-04-19T00:46:43Z"));
    let signature = fixture.sign(&text);

    assert!(verify(&message, &signature).await.unwrap());
    assert!(verify(&text, signature.to_hex()).await.unwrap());

    let hex = signature.to_hex();
    assert!(matches!(
        verify(&text, &hex[..hex.len() - 1]).await,
        Err(SiweError::InvalidSignature(_))
    ));
}

#[tokio::test]
async fn test_invalid_address_in_text_fails_before_recovery() {
    let (siwe, recovery) = fake_siwe(FakeRecovery::returning(Address::ZERO));
    let text = prepare_message(&short_nonce_message()).replace(HARDHAT_ADDRESS_0, "10x");

    let result = siwe.verify(&text, "0x00").await;
    assert!(matches!(
        result,
        Err(SiweError::InvalidAddress(AddressError::InvalidFormat(_)))
    ));
    assert_eq!(recovery.calls(), 0);
}

#[tokio::test]
async fn test_recovery_sees_prepared_text() {
    let fixture = TestFixture::new();
    let (siwe, recovery) = fake_siwe(FakeRecovery::returning(fixture.address()));
    let message = fixture.message();

    assert!(siwe.verify(&message, "0x00").await.unwrap());
    assert_eq!(recovery.calls(), 1);
    assert_eq!(recovery.last_message(), Some(fixture.prepare(&message)));
}

#[tokio::test]
async fn test_mismatched_recovery_is_false() {
    let fixture = TestFixture::new();
    let other = Address::parse(HARDHAT_ADDRESS_1).unwrap();
    let (siwe, _) = fake_siwe(FakeRecovery::returning(other));

    assert!(!siwe.verify(&fixture.message(), "0x00").await.unwrap());
}

#[tokio::test]
async fn test_recovery_errors_propagate() {
    let (siwe, _) = fake_siwe(FakeRecovery::failing(RecoveryError::InvalidLength(1)));
    let result = siwe.verify(&TestFixture::new().message(), "0x00").await;
    assert!(matches!(
        result,
        Err(SiweError::Recovery(RecoveryError::InvalidLength(1)))
    ));
}

#[tokio::test]
async fn test_lowercase_claim_matches_checksummed_signer() {
    let fixture = TestFixture::new();
    let mut message = fixture.message();
    message.address = message.address.to_lowercase();
    let text = fixture.prepare(&message);
    let signature = fixture.sign(&text);

    assert!(verify(&message, &signature).await.unwrap());
}

#[tokio::test]
async fn test_partial_message_does_not_verify_twice() {
    // A partial message draws a new nonce at every serialization, so the
    // text a wallet signed cannot be reproduced from the partial form.
    let fixture = TestFixture::new();
    let mut partial: SiweMessage = fixture.message();
    partial.nonce = None;
    let siwe = Siwe::default();
    let signature = fixture.sign(&siwe.prepare_message(&partial));

    assert!(!siwe.verify(&partial, &signature).await.unwrap());
}

#[tokio::test]
async fn test_shared_across_tasks() {
    let fixture = TestFixture::new();
    let (message, _, signature) = fixture.signed_message();
    let siwe = Siwe::default();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let siwe = siwe.clone();
            let message = message.clone();
            let signature = signature.clone();
            tokio::spawn(async move { siwe.verify(&message, &signature).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
}
