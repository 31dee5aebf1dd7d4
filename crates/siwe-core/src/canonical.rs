//! Canonical text encoding of sign-in messages.
//!
//! The signature covers this text verbatim, so the layout is frozen:
//!
//! ```text
//! [<scheme>://]<domain> wants you to sign in with your Ethereum account:
//! <address>
//!
//! [<statement>
//!
//! ]URI: <uri>
//! Version: <version>
//! Chain ID: <chain id>
//! Nonce: <nonce>
//! Issued At: <issued at>
//! [Expiration Time: <expiration time>]
//! [Not Before: <not before>]
//! [Request ID: <request id>]
//! [Resources:
//! - <resource>...]
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline. The parser in
//! [`crate::parser`] reads the same grammar back.

use crate::error::FieldError;
use crate::message::{Field, SiweMessage};
use crate::traits::{Clock, NonceGenerator};
use crate::validation::format_timestamp;

/// Text following the domain on the first line.
pub const HEADER_SUFFIX: &str = " wants you to sign in with your Ethereum account:";

/// Marker opening each resource line.
pub const RESOURCE_PREFIX: &str = "- ";

/// What to emit when a message carries no statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementPolicy {
    /// Leave the statement block out entirely.
    #[default]
    Omit,
    /// Substitute `Login to <domain>`.
    LoginToDomain,
}

/// Values substituted for fields a partial message leaves out.
pub struct Defaults<'a> {
    /// Chain id used when none is set.
    pub chain_id: u64,
    /// Statement handling when none is set.
    pub statement: StatementPolicy,
    /// Source of fresh nonces.
    pub nonce: &'a dyn NonceGenerator,
    /// Source of the issued-at time.
    pub clock: &'a dyn Clock,
}

/// Fill the fields a partial message may omit.
///
/// Chain id, nonce and issued-at are always populated afterwards; a chain id
/// of zero counts as absent. The statement is populated only under
/// [`StatementPolicy::LoginToDomain`].
pub fn complete(message: &SiweMessage, defaults: &Defaults<'_>) -> SiweMessage {
    let mut complete = message.clone();

    if matches!(complete.chain_id, None | Some(0)) {
        complete.chain_id = Some(defaults.chain_id);
    }
    if is_blank(&complete.nonce) {
        complete.nonce = Some(defaults.nonce.generate());
    }
    if is_blank(&complete.issued_at) {
        complete.issued_at = Some(format_timestamp(defaults.clock.now()));
    }
    if is_blank(&complete.statement) && defaults.statement == StatementPolicy::LoginToDomain {
        complete.statement = Some(format!("Login to {}", complete.domain));
    }

    complete
}

/// Produce the canonical text for a possibly partial message.
pub fn prepare_message(message: &SiweMessage, defaults: &Defaults<'_>) -> String {
    let complete = complete(message, defaults);
    render(&complete, complete.chain_id.unwrap_or(defaults.chain_id))
}

/// Produce the canonical text for a message that already carries its chain
/// id and nonce. Never consults a clock or nonce source.
pub fn canonical_text(message: &SiweMessage) -> Result<String, FieldError> {
    let chain_id = message
        .chain_id
        .filter(|&id| id != 0)
        .ok_or(FieldError::MissingField(Field::ChainId))?;
    if is_blank(&message.nonce) {
        return Err(FieldError::MissingField(Field::Nonce));
    }
    Ok(render(message, chain_id))
}

fn render(message: &SiweMessage, chain_id: u64) -> String {
    let mut out = String::new();

    if let Some(scheme) = present(&message.scheme) {
        out.push_str(scheme);
        out.push_str("://");
    }
    out.push_str(&message.domain);
    out.push_str(HEADER_SUFFIX);
    out.push('\n');
    out.push_str(&message.address);
    out.push_str("\n\n");

    if let Some(statement) = present(&message.statement) {
        out.push_str(statement);
        out.push_str("\n\n");
    }

    let mut lines = vec![
        field_line(Field::Uri, &message.uri),
        field_line(Field::Version, &message.version),
        field_line(Field::ChainId, &chain_id.to_string()),
        field_line(Field::Nonce, present(&message.nonce).unwrap_or_default()),
    ];

    let optional = [
        (Field::IssuedAt, &message.issued_at),
        (Field::ExpirationTime, &message.expiration_time),
        (Field::NotBefore, &message.not_before),
        (Field::RequestId, &message.request_id),
    ];
    for (field, value) in optional {
        if let Some(value) = present(value) {
            lines.push(field_line(field, value));
        }
    }

    if let Some(resources) = &message.resources {
        lines.push(format!("{}:", key(Field::Resources)));
        lines.extend(resources.iter().map(|r| format!("{RESOURCE_PREFIX}{r}")));
    }

    out.push_str(&lines.join("\n"));
    out
}

fn field_line(field: Field, value: &str) -> String {
    format!("{}: {}", key(field), value)
}

fn key(field: Field) -> &'static str {
    field.key().unwrap_or_default()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    present(value).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    struct StaticClock(DateTime<Utc>);

    impl Clock for StaticClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_nonce() -> String {
        "e4fc0ce5-aa83-4623-b193-98f6d30c9bb1".to_string()
    }

    fn with_defaults<T>(policy: StatementPolicy, f: impl FnOnce(&Defaults<'_>) -> T) -> T {
        let clock = StaticClock(Utc.with_ymd_and_hms(2000, 2, 1, 13, 0, 0).unwrap());
        let defaults = Defaults {
            chain_id: 1,
            statement: policy,
            nonce: &fixed_nonce,
            clock: &clock,
        };
        f(&defaults)
    }

    fn full_message() -> SiweMessage {
        SiweMessage {
            domain: "example.com".into(),
            address: "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".into(),
            uri: "https://example.com".into(),
            version: "1".into(),
            nonce: Some("a6041978-a319-4c2f-8096-abfb99635740".into()),
            issued_at: Some("2024-04-19T00:46:43Z".into()),
            statement: Some("I accept the Terms of Service: https://example.com/tos ".into()),
            resources: Some(vec!["https://example.com/resource".into()]),
            request_id: Some("123".into()),
            chain_id: Some(1),
            expiration_time: Some("2024-04-20T00:46:43Z".into()),
            not_before: Some("2024-04-18T00:46:43Z".into()),
            ..SiweMessage::default()
        }
    }

    #[test]
    fn test_full_layout() {
        let text = with_defaults(StatementPolicy::Omit, |d| prepare_message(&full_message(), d));
        let expected = concat!(
            "example.com wants you to sign in with your Ethereum account:\n",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266\n",
            "\n",
            "I accept the Terms of Service: https://example.com/tos \n",
            "\n",
            "URI: https://example.com\n",
            "Version: 1\n",
            "Chain ID: 1\n",
            "Nonce: a6041978-a319-4c2f-8096-abfb99635740\n",
            "Issued At: 2024-04-19T00:46:43Z\n",
            "Expiration Time: 2024-04-20T00:46:43Z\n",
            "Not Before: 2024-04-18T00:46:43Z\n",
            "Request ID: 123\n",
            "Resources:\n",
            "- https://example.com/resource",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_defaults_fill_partial_message() {
        let partial = SiweMessage {
            domain: "example.com".into(),
            address: "0x0000000000000000000000000000000000000000".into(),
            uri: "https://example.com".into(),
            version: "1".into(),
            ..SiweMessage::default()
        };
        let text = with_defaults(StatementPolicy::Omit, |d| prepare_message(&partial, d));
        let expected = "\
example.com wants you to sign in with your Ethereum account:
0x0000000000000000000000000000000000000000

URI: https://example.com
Version: 1
Chain ID: 1
Nonce: e4fc0ce5-aa83-4623-b193-98f6d30c9bb1
Issued At: 2000-02-01T13:00:00.000Z";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_login_to_domain_policy() {
        let mut message = full_message();
        message.statement = None;
        let text = with_defaults(StatementPolicy::LoginToDomain, |d| prepare_message(&message, d));
        assert!(text.contains("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266\n\nLogin to example.com\n\nURI:"));

        // An explicit statement always wins.
        let text = with_defaults(StatementPolicy::LoginToDomain, |d| prepare_message(&full_message(), d));
        assert!(!text.contains("Login to"));
    }

    #[test]
    fn test_scheme_prefixes_domain() {
        let mut message = full_message();
        message.scheme = Some("https".into());
        let text = canonical_text(&message).unwrap();
        assert!(text.starts_with("https://example.com wants you to sign in"));
    }

    #[test]
    fn test_empty_resources_emit_bare_key() {
        let mut message = full_message();
        message.resources = Some(vec![]);
        let text = canonical_text(&message).unwrap();
        assert!(text.ends_with("Request ID: 123\nResources:"));
    }

    #[test]
    fn test_empty_optional_strings_are_skipped() {
        let mut message = full_message();
        message.request_id = Some(String::new());
        message.statement = Some(String::new());
        let text = canonical_text(&message).unwrap();
        assert!(!text.contains("Request ID"));
        assert!(text.contains("cfffb92266\n\nURI:"));
    }

    #[test]
    fn test_canonical_text_requires_nonce_and_chain() {
        let mut message = full_message();
        message.nonce = None;
        assert_eq!(
            canonical_text(&message),
            Err(FieldError::MissingField(Field::Nonce))
        );

        let mut message = full_message();
        message.chain_id = None;
        assert_eq!(
            canonical_text(&message),
            Err(FieldError::MissingField(Field::ChainId))
        );
    }

    #[test]
    fn test_zero_chain_id_takes_default() {
        let mut message = full_message();
        message.chain_id = Some(0);
        let text = with_defaults(StatementPolicy::Omit, |d| prepare_message(&message, d));
        assert!(text.contains("\nChain ID: 1\n"));
        assert_eq!(
            crate::parser::parse_message(&text).unwrap().chain_id,
            Some(1)
        );

        assert_eq!(
            canonical_text(&message),
            Err(FieldError::MissingField(Field::ChainId))
        );
    }

    #[test]
    fn test_prepare_is_deterministic_for_complete_message() {
        let a = with_defaults(StatementPolicy::Omit, |d| prepare_message(&full_message(), d));
        let b = canonical_text(&full_message()).unwrap();
        assert_eq!(a, b);
    }
}
