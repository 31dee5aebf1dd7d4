//! Parser for canonical message text.
//!
//! The text is read line by line (empty lines dropped) through a small
//! state machine over the sections of the grammar in [`crate::canonical`]:
//!
//! ```text
//! Header -> Address -> Statement -> Fields -> Resources
//! ```
//!
//! Header and address are positional. Every line between the address and the
//! first recognized field key belongs to the statement, which may be absent or
//! a single line. Field keys may come in any order but at most once, and
//! lines in the field block with no recognized key are skipped. After
//! `Resources:` only `- <uri>` lines may follow.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::canonical::RESOURCE_PREFIX;
use crate::error::{FieldError, ParseError};
use crate::message::{Field, SiweMessage};
use crate::types::Address;
use crate::validation::{
    parse_chain_id, parse_timestamp, validate_nonce, validate_required, validate_statement,
    validate_version,
};

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<scheme>.*?)://)?(?P<domain>.*?) wants you to sign in with your Ethereum account:$",
    )
    .expect("static regex")
});

/// Section of the message the next line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Statement,
    Fields,
    Resources,
}

/// A line split into a recognized field key and its trimmed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine<'a> {
    pub field: Field,
    pub value: &'a str,
}

/// Split `line` on its first colon and look the prefix up in the field table.
///
/// Returns `None` for lines without a colon or with an unknown key.
pub fn parse_line(line: &str) -> Option<FieldLine<'_>> {
    let (prefix, value) = line.split_once(':')?;
    let field = Field::from_key(prefix)?;
    Some(FieldLine {
        field,
        value: value.trim(),
    })
}

/// Split a header line into its optional scheme and its domain.
pub fn parse_header(line: &str) -> Result<(Option<String>, String), ParseError> {
    let captures = HEADER_RE
        .captures(line)
        .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
    let scheme = captures
        .name("scheme")
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty());
    let domain = captures
        .name("domain")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Ok((scheme, domain))
}

/// Parse canonical text back into a [`SiweMessage`].
///
/// The returned address is normalized to its EIP-55 checksum form.
pub fn parse_message(text: &str) -> Result<SiweMessage, ParseError> {
    let mut lines = text.split('\n').filter(|line| !line.is_empty());

    let header = lines.next().ok_or(ParseError::Empty)?;
    let (scheme, domain) = parse_header(header)?;

    let address_line = lines.next().ok_or(ParseError::MissingAddress)?;
    let address = Address::parse(address_line)?;

    let mut message = SiweMessage {
        scheme,
        domain,
        address: address.to_checksum(),
        ..SiweMessage::default()
    };

    let mut section = Section::Statement;
    let mut seen: Vec<Field> = Vec::new();

    for line in lines {
        if section == Section::Resources {
            let resource = line
                .strip_prefix(RESOURCE_PREFIX)
                .ok_or_else(|| ParseError::UnexpectedLine {
                    line: line.to_string(),
                    expected: "a resource entry",
                })?;
            message
                .resources
                .get_or_insert_with(Vec::new)
                .push(resource.trim().to_string());
            continue;
        }

        let Some(FieldLine { field, value }) = parse_line(line) else {
            if section == Section::Fields {
                continue;
            }
            if message.statement.is_some() {
                return Err(ParseError::MultilineStatement);
            }
            validate_statement(line)?;
            message.statement = Some(line.to_string());
            continue;
        };

        if seen.contains(&field) {
            return Err(ParseError::DuplicateField(field));
        }
        seen.push(field);
        section = Section::Fields;

        apply_field(&mut message, field, value)?;
        if field == Field::Resources {
            section = Section::Resources;
        }
    }

    validate_required(&message)?;
    Ok(message)
}

fn apply_field(message: &mut SiweMessage, field: Field, value: &str) -> Result<(), ParseError> {
    match field {
        Field::Uri => message.uri = value.to_string(),
        Field::Version => {
            validate_version(value)?;
            message.version = value.to_string();
        }
        Field::ChainId => message.chain_id = Some(parse_chain_id(value)?),
        Field::Nonce => {
            validate_nonce(value)?;
            message.nonce = Some(value.to_string());
        }
        Field::IssuedAt => {
            parse_timestamp(field, value)?;
            message.issued_at = Some(value.to_string());
        }
        Field::ExpirationTime => {
            parse_timestamp(field, value)?;
            message.expiration_time = Some(value.to_string());
        }
        Field::NotBefore => {
            parse_timestamp(field, value)?;
            message.not_before = Some(value.to_string());
        }
        Field::RequestId => message.request_id = Some(value.to_string()),
        Field::Resources => {
            if !value.is_empty() {
                return Err(ParseError::UnexpectedLine {
                    line: format!("Resources: {value}"),
                    expected: "a bare Resources: line",
                });
            }
            message.resources = Some(Vec::new());
        }
        Field::Scheme | Field::Domain | Field::Address | Field::Statement => {
            return Err(FieldError::MissingField(field).into());
        }
    }
    Ok(())
}
