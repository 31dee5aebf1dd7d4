//! Golden test vectors for the message grammar and signature recovery.
//!
//! Positive vectors pair canonical text with the message it parses to.
//! Negative vectors name the error a malformed text must produce. The
//! recovery vector is a signature taken from a browser wallet.

use serde::Serialize;
use siwe_core::{FieldError, ParseError, SiweMessage};

/// Text that parses to a known message.
#[derive(Debug, Clone, Serialize)]
pub struct PositiveVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The message text.
    pub text: &'static str,
    /// The message the text parses to.
    pub message: SiweMessage,
    /// Whether re-encoding the message reproduces `text` exactly.
    pub canonical: bool,
}

/// Text that must fail to parse.
#[derive(Debug, Clone, Serialize)]
pub struct NegativeVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The malformed text.
    pub text: String,
    /// Variant name of the expected error, as returned by [`error_kind`].
    pub error: &'static str,
}

/// A signature with the address it recovers to.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryVector {
    pub name: &'static str,
    pub message: &'static str,
    pub signature: &'static str,
    pub address: &'static str,
}

const BASE: &str = "\
example.com wants you to sign in with your Ethereum account:
0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266

URI: https://example.com
Version: 1
Chain ID: 1
Nonce: 32891757
Issued At: 2021-09-30T16:25:24.000Z";

const WALLET_MESSAGE: &str = "\
example.com wants you to sign in with your Ethereum account:
0x70997970C51812dc3A010C7d01b50e0d17dc79C8

test

URI: https://example.com
Version: 1
Chain ID: 1
Nonce: 3cb7760eac2f
Issued At: 2022-02-14T22:27:35.500Z";

fn message(domain: &str, address: &str, uri: &str, nonce: &str) -> SiweMessage {
    SiweMessage {
        domain: domain.into(),
        address: address.into(),
        uri: uri.into(),
        version: "1".into(),
        chain_id: Some(1),
        nonce: Some(nonce.into()),
        ..SiweMessage::default()
    }
}

/// The message [`BASE`] parses to.
fn base_message() -> SiweMessage {
    SiweMessage {
        issued_at: Some("2021-09-30T16:25:24.000Z".into()),
        ..message(
            "example.com",
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "https://example.com",
            "32891757",
        )
    }
}

/// Get all positive parse vectors.
pub fn positive_vectors() -> Vec<PositiveVector> {
    vec![
        PositiveVector {
            name: "statement and resources",
            text: "\
service.org wants you to sign in with your Ethereum account:
0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2

I accept the ServiceOrg Terms of Service: https://service.org/tos

URI: https://service.org/login
Version: 1
Chain ID: 1
Nonce: 32891757
Issued At: 2021-09-30T16:25:24.000Z
Resources:
- ipfs://Qme7ss3ARVgxv6rXqVPiikMJ8u2NLgmgszg13pYrDKEoiu
- https://example.com/my-web2-claim.json",
            message: SiweMessage {
                statement: Some(
                    "I accept the ServiceOrg Terms of Service: https://service.org/tos".into(),
                ),
                issued_at: Some("2021-09-30T16:25:24.000Z".into()),
                resources: Some(vec![
                    "ipfs://Qme7ss3ARVgxv6rXqVPiikMJ8u2NLgmgszg13pYrDKEoiu".into(),
                    "https://example.com/my-web2-claim.json".into(),
                ]),
                ..message(
                    "service.org",
                    "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                    "https://service.org/login",
                    "32891757",
                )
            },
            canonical: true,
        },
        PositiveVector {
            name: "no statement",
            text: BASE,
            message: base_message(),
            canonical: true,
        },
        PositiveVector {
            name: "scheme and every optional field",
            text: "\
https://example.com wants you to sign in with your Ethereum account:
0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266

Sign in to Example

URI: https://example.com
Version: 1
Chain ID: 137
Nonce: abcdef0123456789
Issued At: 2024-04-19T00:46:43Z
Expiration Time: 2024-04-20T00:46:43Z
Not Before: 2024-04-18T00:46:43Z
Request ID: 123
Resources:
- https://example.com/resource",
            message: SiweMessage {
                scheme: Some("https".into()),
                statement: Some("Sign in to Example".into()),
                chain_id: Some(137),
                issued_at: Some("2024-04-19T00:46:43Z".into()),
                expiration_time: Some("2024-04-20T00:46:43Z".into()),
                not_before: Some("2024-04-18T00:46:43Z".into()),
                request_id: Some("123".into()),
                resources: Some(vec!["https://example.com/resource".into()]),
                ..message(
                    "example.com",
                    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                    "https://example.com",
                    "abcdef0123456789",
                )
            },
            canonical: true,
        },
        PositiveVector {
            name: "empty resources without issued-at",
            text: "\
login.xyz wants you to sign in with your Ethereum account:
0x70997970C51812dc3A010C7d01b50e0d17dc79C8

URI: https://login.xyz
Version: 1
Chain ID: 5
Nonce: 0123456789
Resources:",
            message: SiweMessage {
                chain_id: Some(5),
                resources: Some(vec![]),
                ..message(
                    "login.xyz",
                    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
                    "https://login.xyz",
                    "0123456789",
                )
            },
            canonical: true,
        },
        PositiveVector {
            name: "wallet-signed message",
            text: WALLET_MESSAGE,
            message: SiweMessage {
                statement: Some("test".into()),
                issued_at: Some("2022-02-14T22:27:35.500Z".into()),
                ..message(
                    "example.com",
                    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
                    "https://example.com",
                    "3cb7760eac2f",
                )
            },
            canonical: true,
        },
        PositiveVector {
            name: "lowercase address is normalized",
            text: "\
example.com wants you to sign in with your Ethereum account:
0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266

URI: https://example.com
Version: 1
Chain ID: 1
Nonce: 32891757
Issued At: 2021-09-30T16:25:24.000Z",
            message: SiweMessage {
                issued_at: Some("2021-09-30T16:25:24.000Z".into()),
                ..message(
                    "example.com",
                    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                    "https://example.com",
                    "32891757",
                )
            },
            canonical: false,
        },
        PositiveVector {
            name: "fields out of order",
            text: "\
example.com wants you to sign in with your Ethereum account:
0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266

Version: 1
Nonce: 32891757
URI: https://example.com
Issued At: 2021-09-30T16:25:24.000Z
Chain ID: 1",
            message: base_message(),
            canonical: false,
        },
        PositiveVector {
            name: "unknown field is skipped",
            text: "\
example.com wants you to sign in with your Ethereum account:
0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266

URI: https://example.com
Version: 1
Color: blue
Chain ID: 1
Nonce: 32891757
Issued At: 2021-09-30T16:25:24.000Z",
            message: base_message(),
            canonical: false,
        },
    ]
}

fn negative(name: &'static str, text: impl Into<String>, error: &'static str) -> NegativeVector {
    NegativeVector {
        name,
        text: text.into(),
        error,
    }
}

/// Get all negative parse vectors.
pub fn negative_vectors() -> Vec<NegativeVector> {
    vec![
        negative("empty text", "", "Empty"),
        negative("only newlines", "\n\n", "Empty"),
        negative("not a header", "abc", "MalformedHeader"),
        negative(
            "header only",
            "example.com wants you to sign in with your Ethereum account:",
            "MissingAddress",
        ),
        negative(
            "malformed address",
            BASE.replace("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "10x"),
            "InvalidAddress",
        ),
        negative(
            "bad checksum",
            BASE.replace("0xf39Fd6e5", "0xF39Fd6e5"),
            "InvalidAddress",
        ),
        negative(
            "domain with spaces",
            BASE.replace("example.com wants", "not a domain wants"),
            "InvalidDomain",
        ),
        negative(
            "short nonce",
            BASE.replace("Nonce: 32891757", "Nonce: 1234567"),
            "NonceTooShort",
        ),
        negative(
            "unparseable issued-at",
            BASE.replace("2021-09-30T16:25:24.000Z", "yesterday"),
            "InvalidDate",
        ),
        negative(
            "version 2",
            BASE.replace("Version: 1", "Version: 2"),
            "UnsupportedVersion",
        ),
        negative(
            "chain id zero",
            BASE.replace("Chain ID: 1", "Chain ID: 0"),
            "InvalidChainId",
        ),
        negative(
            "chain id not a number",
            BASE.replace("Chain ID: 1", "Chain ID: one"),
            "InvalidChainId",
        ),
        negative(
            "missing uri",
            BASE.replace("URI: https://example.com\n", ""),
            "MissingField",
        ),
        negative(
            "missing nonce",
            BASE.replace("Nonce: 32891757\n", ""),
            "MissingField",
        ),
        negative(
            "duplicate nonce",
            BASE.replace("Nonce: 32891757", "Nonce: 32891757\nNonce: 32891758"),
            "DuplicateField",
        ),
        negative(
            "two statement lines",
            BASE.replace("\n\nURI:", "\n\nfirst line\nsecond line\n\nURI:"),
            "MultilineStatement",
        ),
        negative(
            "escaped newline in statement",
            BASE.replace("\n\nURI:", "\n\nHello\\nWorld\n\nURI:"),
            "InvalidStatement",
        ),
        negative(
            "resource without marker",
            format!("{BASE}\nResources:\nhttps://example.com"),
            "UnexpectedLine",
        ),
    ]
}

/// Get the signature recovery vectors.
pub fn recovery_vectors() -> Vec<RecoveryVector> {
    vec![RecoveryVector {
        name: "browser wallet signature",
        message: WALLET_MESSAGE,
        signature: "0x9059c9a69c31e87d887262a574abcc33f320d5b778bea8a35c6fbdea94a17e9652b99f7cdd146ed67fa8e4bb02462774b958a129c421fe8d743a43bf67dcbcd61c",
        address: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    }]
}

/// Name the variant of a parse error, descending into field errors.
pub fn error_kind(error: &ParseError) -> &'static str {
    match error {
        ParseError::Empty => "Empty",
        ParseError::MalformedHeader(_) => "MalformedHeader",
        ParseError::MissingAddress => "MissingAddress",
        ParseError::InvalidAddress(_) => "InvalidAddress",
        ParseError::UnexpectedLine { .. } => "UnexpectedLine",
        ParseError::DuplicateField(_) => "DuplicateField",
        ParseError::MultilineStatement => "MultilineStatement",
        ParseError::Field(field) => match field {
            FieldError::InvalidDomain(_) => "InvalidDomain",
            FieldError::MissingField(_) => "MissingField",
            FieldError::InvalidDate { .. } => "InvalidDate",
            FieldError::NonceTooShort(_) => "NonceTooShort",
            FieldError::UnsupportedVersion(_) => "UnsupportedVersion",
            FieldError::InvalidChainId(_) => "InvalidChainId",
            FieldError::InvalidStatement => "InvalidStatement",
        },
    }
}

/// Check every parse vector, returning (name, passed, detail) per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let positives = positive_vectors().into_iter().map(|v| {
        match siwe_core::parse_message(v.text) {
            Ok(parsed) if parsed == v.message => (v.name.to_string(), true, String::new()),
            Ok(parsed) => (v.name.to_string(), false, format!("parsed to {parsed:?}")),
            Err(e) => (v.name.to_string(), false, e.to_string()),
        }
    });
    let negatives = negative_vectors().into_iter().map(|v| {
        match siwe_core::parse_message(&v.text) {
            Ok(_) => (v.name.to_string(), false, "parsed successfully".to_string()),
            Err(e) if error_kind(&e) == v.error => (v.name.to_string(), true, String::new()),
            Err(e) => (v.name.to_string(), false, format!("expected {}, got {e}", v.error)),
        }
    });
    positives.chain(negatives).collect()
}

/// Serialize every vector as pretty JSON for other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "positive": positive_vectors(),
        "negative": negative_vectors(),
        "recovery": recovery_vectors(),
    }))
}
