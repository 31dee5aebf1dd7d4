//! The sign-in message model.
//!
//! A [`SiweMessage`] is a plain value. The serializer fills in the chain id,
//! nonce and issued-at time when they are absent; the parser always returns
//! them populated (issued-at excepted, which the grammar leaves optional).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FieldError;
use crate::validation::{parse_timestamp, validate_statement};

/// Every field of a sign-in message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Scheme,
    Domain,
    Address,
    Statement,
    Uri,
    Version,
    ChainId,
    Nonce,
    IssuedAt,
    ExpirationTime,
    NotBefore,
    RequestId,
    Resources,
}

impl Field {
    /// Keyed fields of the field block, in canonical order.
    pub const KEYED: [Field; 9] = [
        Field::Uri,
        Field::Version,
        Field::ChainId,
        Field::Nonce,
        Field::IssuedAt,
        Field::ExpirationTime,
        Field::NotBefore,
        Field::RequestId,
        Field::Resources,
    ];

    /// The key this field is written under in the field block, if it has one.
    pub fn key(self) -> Option<&'static str> {
        match self {
            Field::Uri => Some("URI"),
            Field::Version => Some("Version"),
            Field::ChainId => Some("Chain ID"),
            Field::Nonce => Some("Nonce"),
            Field::IssuedAt => Some("Issued At"),
            Field::ExpirationTime => Some("Expiration Time"),
            Field::NotBefore => Some("Not Before"),
            Field::RequestId => Some("Request ID"),
            Field::Resources => Some("Resources"),
            Field::Scheme | Field::Domain | Field::Address | Field::Statement => None,
        }
    }

    /// Look up a field-block key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::KEYED.into_iter().find(|f| f.key() == Some(key))
    }

    /// The camelCase model name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::Scheme => "scheme",
            Field::Domain => "domain",
            Field::Address => "address",
            Field::Statement => "statement",
            Field::Uri => "uri",
            Field::Version => "version",
            Field::ChainId => "chainId",
            Field::Nonce => "nonce",
            Field::IssuedAt => "issuedAt",
            Field::ExpirationTime => "expirationTime",
            Field::NotBefore => "notBefore",
            Field::RequestId => "requestId",
            Field::Resources => "resources",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Sign-In with Ethereum message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiweMessage {
    /// URI scheme of the requesting origin, e.g. `https`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// RFC 4501 authority requesting the sign-in.
    pub domain: String,

    /// Claimed signer address. Parsed messages carry the EIP-55 form.
    pub address: String,

    /// Human-readable assertion, single line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,

    /// Resource the sign-in is scoped to.
    pub uri: String,

    /// Message version, always "1".
    pub version: String,

    /// EIP-155 chain id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Replay-protection token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

impl SiweMessage {
    /// Start building a version 1 message.
    pub fn builder(
        domain: impl Into<String>,
        address: impl Into<String>,
        uri: impl Into<String>,
    ) -> SiweMessageBuilder {
        SiweMessageBuilder::new(domain, address, uri)
    }

    /// Parsed `Issued At`, if present and well-formed.
    pub fn issued_at_time(&self) -> Option<DateTime<Utc>> {
        parse_optional(Field::IssuedAt, self.issued_at.as_deref())
    }

    /// Parsed `Expiration Time`, if present and well-formed.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        parse_optional(Field::ExpirationTime, self.expiration_time.as_deref())
    }

    /// Parsed `Not Before`, if present and well-formed.
    pub fn not_before_time(&self) -> Option<DateTime<Utc>> {
        parse_optional(Field::NotBefore, self.not_before.as_deref())
    }

    /// Whether the message has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration().is_some_and(|exp| now >= exp)
    }

    /// Whether the message is not yet valid at `now`.
    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before_time().is_some_and(|nbf| now < nbf)
    }
}

fn parse_optional(field: Field, value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(|v| parse_timestamp(field, v).ok())
}

/// Builder for [`SiweMessage`].
#[derive(Debug, Clone)]
pub struct SiweMessageBuilder {
    message: SiweMessage,
}

impl SiweMessageBuilder {
    /// Start building a message for the given domain, signer and URI.
    pub fn new(
        domain: impl Into<String>,
        address: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            message: SiweMessage {
                domain: domain.into(),
                address: address.into(),
                uri: uri.into(),
                version: "1".to_string(),
                ..SiweMessage::default()
            },
        }
    }

    /// Set the origin scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.message.scheme = non_empty(scheme.into());
        self
    }

    /// Set the statement.
    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.message.statement = non_empty(statement.into());
        self
    }

    /// Set the chain id.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.message.chain_id = Some(chain_id);
        self
    }

    /// Set the nonce.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.message.nonce = non_empty(nonce.into());
        self
    }

    /// Set the issued-at timestamp (ISO-8601).
    pub fn issued_at(mut self, issued_at: impl Into<String>) -> Self {
        self.message.issued_at = non_empty(issued_at.into());
        self
    }

    /// Set the expiration timestamp (ISO-8601).
    pub fn expiration_time(mut self, expiration_time: impl Into<String>) -> Self {
        self.message.expiration_time = non_empty(expiration_time.into());
        self
    }

    /// Set the not-before timestamp (ISO-8601).
    pub fn not_before(mut self, not_before: impl Into<String>) -> Self {
        self.message.not_before = non_empty(not_before.into());
        self
    }

    /// Set the request id.
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.message.request_id = non_empty(request_id.into());
        self
    }

    /// Append a resource URI.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.message
            .resources
            .get_or_insert_with(Vec::new)
            .push(resource.into());
        self
    }

    /// Replace the resource list.
    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message.resources = Some(resources.into_iter().map(Into::into).collect());
        self
    }

    /// Finish, rejecting a statement that spans lines.
    pub fn build(self) -> Result<SiweMessage, FieldError> {
        if let Some(statement) = &self.message.statement {
            validate_statement(statement)?;
        }
        Ok(self.message)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
