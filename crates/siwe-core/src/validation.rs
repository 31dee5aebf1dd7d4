//! Field validation rules shared by the parser and the message builder.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldError;
use crate::message::{Field, SiweMessage};

/// Minimum nonce length accepted by the parser.
pub const MIN_NONCE_LEN: usize = 8;

/// The only message version this crate understands.
pub const MESSAGE_VERSION: u32 = 1;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9]+([-.][a-z0-9]+)*\.[a-z]{2,6}$").expect("static regex")
});

/// Check that `domain` is an RFC 4501 style authority.
pub fn validate_domain(domain: &str) -> Result<(), FieldError> {
    if DOMAIN_RE.is_match(domain) {
        Ok(())
    } else {
        Err(FieldError::InvalidDomain(domain.to_string()))
    }
}

/// Parse an ISO-8601 timestamp that must survive a round trip unchanged.
///
/// The value is read as RFC 3339 and re-rendered in UTC with a `Z` suffix
/// and as many fractional digits as the input had (0, 3, 6 or 9). Anything
/// that does not reproduce the input byte for byte is rejected, so offsets
/// other than `Z` and odd precisions are invalid dates.
pub fn parse_timestamp(field: Field, value: &str) -> Result<DateTime<Utc>, FieldError> {
    let invalid = || FieldError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let format = match fraction_digits(value) {
        0 => SecondsFormat::Secs,
        3 => SecondsFormat::Millis,
        6 => SecondsFormat::Micros,
        9 => SecondsFormat::Nanos,
        _ => return Err(invalid()),
    };

    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|_| invalid())?
        .with_timezone(&Utc);

    if parsed.to_rfc3339_opts(format, true) == value {
        Ok(parsed)
    } else {
        Err(invalid())
    }
}

fn fraction_digits(value: &str) -> usize {
    match value.split_once('.') {
        Some((_, rest)) => rest.bytes().take_while(u8::is_ascii_digit).count(),
        None => 0,
    }
}

/// Render a timestamp the way the serializer emits `Issued At` defaults.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Check the nonce length.
pub fn validate_nonce(nonce: &str) -> Result<(), FieldError> {
    let len = nonce.chars().count();
    if len < MIN_NONCE_LEN {
        return Err(FieldError::NonceTooShort(len));
    }
    Ok(())
}

/// Check that the version parses to 1.
pub fn validate_version(version: &str) -> Result<(), FieldError> {
    match version.parse::<u32>() {
        Ok(MESSAGE_VERSION) => Ok(()),
        _ => Err(FieldError::UnsupportedVersion(version.to_string())),
    }
}

/// Parse a chain id. Zero is not a valid EIP-155 chain.
pub fn parse_chain_id(value: &str) -> Result<u64, FieldError> {
    match value.parse::<u64>() {
        Ok(0) | Err(_) => Err(FieldError::InvalidChainId(value.to_string())),
        Ok(id) => Ok(id),
    }
}

/// Reject statements that span lines, including the escaped `\n` form.
pub fn validate_statement(statement: &str) -> Result<(), FieldError> {
    if statement.contains(&['\n', '\r'][..]) || statement.contains("\\n") {
        return Err(FieldError::InvalidStatement);
    }
    Ok(())
}

/// Check the fields a parsed message must carry.
///
/// Order of checks: domain authority, URI presence, then the remaining
/// required fields.
pub fn validate_required(message: &SiweMessage) -> Result<(), FieldError> {
    validate_domain(&message.domain)?;

    if message.uri.is_empty() {
        return Err(FieldError::MissingField(Field::Uri));
    }
    if message.address.is_empty() {
        return Err(FieldError::MissingField(Field::Address));
    }
    if message.version.is_empty() {
        return Err(FieldError::MissingField(Field::Version));
    }
    if message.chain_id.is_none() {
        return Err(FieldError::MissingField(Field::ChainId));
    }
    if message.nonce.as_deref().map_or(true, str::is_empty) {
        return Err(FieldError::MissingField(Field::Nonce));
    }
    Ok(())
}
