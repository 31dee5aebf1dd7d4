//! Serializer and parser agreement: round trips, defaulting, and the
//! golden parse vectors.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use siwe::core::canonical_text;
use siwe::{parse_message, prepare_message, Siwe, SiweConfig, SiweMessage, StatementPolicy};
use siwe_testkit::generators::{message_from_params, MessageParams};
use siwe_testkit::vectors::{error_kind, negative_vectors, positive_vectors};
use siwe_testkit::{FixedClock, FixedNonce};

fn partial() -> SiweMessage {
    SiweMessage::builder(
        "example.com",
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        "https://example.com",
    )
    .build()
    .unwrap()
}

proptest! {
    #[test]
    fn test_parse_inverts_prepare(params: MessageParams) {
        let message = message_from_params(&params);
        let text = canonical_text(&message).unwrap();
        prop_assert_eq!(parse_message(&text).unwrap(), message);
    }

    #[test]
    fn test_prepare_of_complete_message_is_stable(params: MessageParams) {
        let mut message = message_from_params(&params);
        if message.issued_at.is_none() {
            message.issued_at = Some("2022-02-14T22:27:35.500Z".into());
        }
        prop_assert_eq!(prepare_message(&message), prepare_message(&message));
        prop_assert_eq!(prepare_message(&message), canonical_text(&message).unwrap());
    }
}

#[test]
fn test_defaults_are_filled() {
    let before = Utc::now() - Duration::seconds(1);
    let text = prepare_message(&partial());
    let parsed = parse_message(&text).unwrap();

    assert!(text.contains("\nChain ID: 1\n"));
    assert!(parsed.nonce.as_deref().unwrap().len() >= 8);

    let issued = parsed.issued_at_time().unwrap();
    assert!(issued >= before);
    assert!(issued <= Utc::now() + Duration::seconds(1));
}

#[test]
fn test_fresh_nonce_per_call() {
    assert_ne!(prepare_message(&partial()), prepare_message(&partial()));
}

#[test]
fn test_statement_policies() {
    let omit = Siwe::default()
        .with_nonce_generator(FixedNonce::default())
        .with_clock(FixedClock::default());
    let text = omit.prepare_message(&partial());
    assert!(text.contains("cffFb92266\n\nURI: "));
    assert_eq!(parse_message(&text).unwrap().statement, None);

    let login = Siwe::new(
        siwe::Secp256k1Recovery,
        SiweConfig {
            statement: StatementPolicy::LoginToDomain,
            ..SiweConfig::default()
        },
    );
    let text = login.prepare_message(&partial());
    assert_eq!(
        parse_message(&text).unwrap().statement.as_deref(),
        Some("Login to example.com")
    );
}

#[test]
fn test_resources_fidelity() {
    let mut message = partial();
    message.resources = Some(vec!["https://example.com/resource".into()]);
    let text = prepare_message(&message);

    assert!(text.ends_with("\nResources:\n- https://example.com/resource"));
    assert_eq!(
        parse_message(&text).unwrap().resources,
        Some(vec!["https://example.com/resource".to_string()])
    );
}

#[test]
fn test_golden_positive_vectors() {
    for vector in positive_vectors() {
        let parsed = parse_message(vector.text)
            .unwrap_or_else(|e| panic!("{}: {e}", vector.name));
        assert_eq!(parsed, vector.message, "{}", vector.name);
        if vector.canonical {
            assert_eq!(canonical_text(&parsed).unwrap(), vector.text, "{}", vector.name);
        }
    }
}

#[test]
fn test_reordered_text_reencodes_canonically() {
    for vector in positive_vectors().into_iter().filter(|v| !v.canonical) {
        let text = canonical_text(&parse_message(vector.text).unwrap()).unwrap();
        assert_ne!(text, vector.text, "{}", vector.name);
        assert_eq!(parse_message(&text).unwrap(), vector.message, "{}", vector.name);
        let uri = text.find("\nURI: ").unwrap();
        let version = text.find("\nVersion: ").unwrap();
        assert!(uri < version, "{}", vector.name);
    }
}

#[test]
fn test_golden_negative_vectors() {
    for vector in negative_vectors() {
        match parse_message(&vector.text) {
            Ok(parsed) => panic!("{} parsed: {parsed:?}", vector.name),
            Err(e) => assert_eq!(error_kind(&e), vector.error, "{}: {e}", vector.name),
        }
    }
}

#[test]
fn test_json_model_round_trip() {
    for vector in positive_vectors() {
        let json = serde_json::to_string(&vector.message).unwrap();
        let back: SiweMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector.message, "{}", vector.name);
    }

    let json = siwe_testkit::vectors::vectors_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["positive"].as_array().map(Vec::len),
        Some(positive_vectors().len())
    );
}
