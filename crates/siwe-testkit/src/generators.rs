//! Proptest generators for property-based testing.
//!
//! Every generated message is one the canonical encoder can represent
//! unambiguously: statements carry no `:` and no line breaks, and values
//! carry no surrounding whitespace.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use siwe_core::validation::format_timestamp;
use siwe_core::{Address, SiweMessage};

/// Generate a random address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate a domain accepted by the authority check.
pub fn domain() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,15}(-[a-z0-9]{1,8})?(\\.[a-z][a-z0-9]{0,10}){0,2}\\.[a-z]{2,6}"
        .prop_map(String::from)
}

/// Generate a URI scheme.
pub fn scheme() -> impl Strategy<Value = String> {
    prop_oneof![Just("https"), Just("http"), Just("ftp")].prop_map(String::from)
}

/// Generate a single-line statement.
pub fn statement() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.!?'-]{0,79}".prop_map(String::from)
}

/// Generate a URI.
pub fn uri() -> impl Strategy<Value = String> {
    "(https|ipfs)://[a-z][a-z0-9]{0,10}\\.[a-z]{2,4}(/[a-z0-9_-]{1,10}){0,3}".prop_map(String::from)
}

/// Generate a nonce of valid length.
pub fn nonce() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{8,32}".prop_map(String::from)
}

/// Generate a chain id.
pub fn chain_id() -> impl Strategy<Value = u64> {
    1u64..=u64::MAX
}

/// Generate a timestamp in the form the encoder emits.
pub fn timestamp() -> impl Strategy<Value = String> {
    // Between 1970 and 2100, at millisecond precision.
    (0i64..=4_102_444_800_000i64).prop_map(|millis| {
        let time = Utc.timestamp_millis_opt(millis).single().unwrap_or_default();
        format_timestamp(time)
    })
}

/// Generate a request id.
pub fn request_id() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_-]{0,35}".prop_map(String::from)
}

/// Generate a resource list.
pub fn resources(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(uri(), 0..=max_len)
}

/// Parameters for generating a message.
#[derive(Debug, Clone)]
pub struct MessageParams {
    pub scheme: Option<String>,
    pub domain: String,
    pub address: Address,
    pub statement: Option<String>,
    pub uri: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: Option<String>,
    pub expiration_time: Option<String>,
    pub not_before: Option<String>,
    pub request_id: Option<String>,
    pub resources: Option<Vec<String>>,
}

impl Arbitrary for MessageParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            (
                proptest::option::of(scheme()),
                domain(),
                address(),
                proptest::option::of(statement()),
                uri(),
                chain_id(),
            ),
            (
                nonce(),
                proptest::option::of(timestamp()),
                proptest::option::of(timestamp()),
                proptest::option::of(timestamp()),
                proptest::option::of(request_id()),
                proptest::option::of(resources(4)),
            ),
        )
            .prop_map(
                |(
                    (scheme, domain, address, statement, uri, chain_id),
                    (nonce, issued_at, expiration_time, not_before, request_id, resources),
                )| MessageParams {
                    scheme,
                    domain,
                    address,
                    statement,
                    uri,
                    chain_id,
                    nonce,
                    issued_at,
                    expiration_time,
                    not_before,
                    request_id,
                    resources,
                },
            )
            .boxed()
    }
}

/// Build a complete message from parameters.
///
/// The address is rendered in its checksum form, which is what the parser
/// returns.
pub fn message_from_params(params: &MessageParams) -> SiweMessage {
    SiweMessage {
        scheme: params.scheme.clone(),
        domain: params.domain.clone(),
        address: params.address.to_checksum(),
        statement: params.statement.clone(),
        uri: params.uri.clone(),
        version: "1".to_string(),
        chain_id: Some(params.chain_id),
        nonce: Some(params.nonce.clone()),
        issued_at: params.issued_at.clone(),
        expiration_time: params.expiration_time.clone(),
        not_before: params.not_before.clone(),
        request_id: params.request_id.clone(),
        resources: params.resources.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwe_core::validation::{parse_timestamp, validate_domain, validate_nonce};
    use siwe_core::Field;

    proptest! {
        #[test]
        fn test_generated_domains_are_valid(domain in domain()) {
            prop_assert!(validate_domain(&domain).is_ok());
        }

        #[test]
        fn test_generated_timestamps_parse(ts in timestamp()) {
            prop_assert!(parse_timestamp(Field::IssuedAt, &ts).is_ok());
        }

        #[test]
        fn test_generated_nonces_are_valid(nonce in nonce()) {
            prop_assert!(validate_nonce(&nonce).is_ok());
        }

        #[test]
        fn test_message_is_deterministic(params: MessageParams) {
            prop_assert_eq!(message_from_params(&params), message_from_params(&params));
        }
    }
}
