//! The sign-in service: serialization, parsing and verification over
//! injected collaborators.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use siwe_core::{
    canonical, parser, Address, Clock, Defaults, IntoSignature, NonceGenerator, ParseError,
    SignatureRecovery, SiweMessage, StatementPolicy, SystemClock,
};
use siwe_crypto::{Secp256k1Recovery, UuidNonce};
use tracing::{debug, trace};

use crate::error::{Result, SiweError};

/// Configuration for [`Siwe`].
#[derive(Debug, Clone)]
pub struct SiweConfig {
    /// Chain id emitted when a message does not carry one.
    pub default_chain_id: u64,
    /// What to emit when a message has no statement.
    pub statement: StatementPolicy,
}

impl Default for SiweConfig {
    fn default() -> Self {
        Self {
            default_chain_id: 1,
            statement: StatementPolicy::Omit,
        }
    }
}

/// Extra checks applied by [`Siwe::verify_with`] before recovery.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Domain the message must have been issued for.
    pub domain: Option<String>,
    /// Nonce the message must carry.
    pub nonce: Option<String>,
    /// Time to check the validity window against. Defaults to the clock.
    pub time: Option<DateTime<Utc>>,
}

impl VerifyOptions {
    /// Require the given domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Require the given nonce.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Check expiration and not-before against `time`.
    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

/// What a caller hands to [`Siwe::verify`]: a structured message, or the
/// exact text the wallet signed.
#[derive(Debug, Clone, Copy)]
pub enum MessageInput<'a> {
    /// Serialized before verification.
    Message(&'a SiweMessage),
    /// Verified verbatim; parsed only to learn the claimed address.
    Text(&'a str),
}

impl<'a> From<&'a SiweMessage> for MessageInput<'a> {
    fn from(message: &'a SiweMessage) -> Self {
        Self::Message(message)
    }
}

impl<'a> From<&'a str> for MessageInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for MessageInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

/// The main Siwe struct.
///
/// Holds the collaborators every operation needs:
/// - a [`SignatureRecovery`] backend for verification
/// - a [`NonceGenerator`] and a [`Clock`] for filling partial messages
///
/// All collaborators are shared behind `Arc`, so cloning is cheap and a
/// single value can serve concurrent tasks.
pub struct Siwe<R: SignatureRecovery> {
    recovery: Arc<R>,
    nonce: Arc<dyn NonceGenerator>,
    clock: Arc<dyn Clock>,
    config: SiweConfig,
}

impl<R: SignatureRecovery> Siwe<R> {
    /// Create a new instance with the system clock and UUID nonces.
    pub fn new(recovery: R, config: SiweConfig) -> Self {
        Self {
            recovery: Arc::new(recovery),
            nonce: Arc::new(UuidNonce),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the nonce source.
    pub fn with_nonce_generator(mut self, nonce: impl NonceGenerator + 'static) -> Self {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SiweConfig {
        &self.config
    }

    /// Get the recovery backend.
    pub fn recovery(&self) -> &R {
        &self.recovery
    }

    fn defaults(&self) -> Defaults<'_> {
        Defaults {
            chain_id: self.config.default_chain_id,
            statement: self.config.statement,
            nonce: self.nonce.as_ref(),
            clock: self.clock.as_ref(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Message Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill the defaultable fields of a partial message.
    ///
    /// The result serializes to exactly the text [`Self::prepare_message`]
    /// produced for it, so it can be stored and verified later.
    pub fn complete(&self, message: &SiweMessage) -> SiweMessage {
        canonical::complete(message, &self.defaults())
    }

    /// Produce the canonical text a wallet signs.
    ///
    /// Absent chain id, nonce and issued-at are filled from the config, the
    /// nonce generator and the clock. Each call on a partial message draws
    /// a fresh nonce.
    pub fn prepare_message(&self, message: &SiweMessage) -> String {
        let text = canonical::prepare_message(message, &self.defaults());
        trace!(len = text.len(), "prepared sign-in message");
        text
    }

    /// Parse canonical text back into a message.
    pub fn parse_message(&self, text: &str) -> std::result::Result<SiweMessage, ParseError> {
        parser::parse_message(text)
    }

    /// Generate a fresh nonce.
    pub fn generate_nonce(&self) -> String {
        self.nonce.generate()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Check that `signature` was produced by the message's address over its
    /// canonical text.
    ///
    /// Returns `Ok(false)` only for a well-formed signature made by some
    /// other account. A malformed address or signature is an error, raised
    /// before any recovery is attempted.
    pub async fn verify<'a>(
        &self,
        message: impl Into<MessageInput<'a>>,
        signature: impl IntoSignature,
    ) -> Result<bool> {
        self.verify_inner(message.into(), signature, None).await
    }

    /// Like [`Self::verify`], additionally enforcing `options`.
    pub async fn verify_with<'a>(
        &self,
        message: impl Into<MessageInput<'a>>,
        signature: impl IntoSignature,
        options: &VerifyOptions,
    ) -> Result<bool> {
        self.verify_inner(message.into(), signature, Some(options))
            .await
    }

    async fn verify_inner(
        &self,
        input: MessageInput<'_>,
        signature: impl IntoSignature,
        options: Option<&VerifyOptions>,
    ) -> Result<bool> {
        let (text, claimed, model) = match input {
            MessageInput::Message(message) => {
                let claimed = Address::parse(&message.address)?;
                (self.prepare_message(message), claimed, Some(message))
            }
            MessageInput::Text(text) => {
                let claimed = Address::parse(address_line(text))?;
                (text.to_string(), claimed, None)
            }
        };

        let signature = signature.into_signature()?;

        if let Some(options) = options {
            match model {
                Some(message) => self.check_options(message, options)?,
                None => {
                    let message = parser::parse_message(&text).map_err(|e| {
                        debug!(error = %e, "signed text does not parse");
                        e
                    })?;
                    self.check_options(&message, options)?;
                }
            }
        }

        trace!(len = text.len(), address = %claimed, "recovering signer");
        let recovered = self.recovery.recover_address(&text, &signature).await?;

        if recovered != claimed {
            debug!(%claimed, %recovered, "signature made by a different account");
            return Ok(false);
        }
        Ok(true)
    }

    fn check_options(&self, message: &SiweMessage, options: &VerifyOptions) -> Result<()> {
        if let Some(expected) = &options.domain {
            if expected != &message.domain {
                return Err(SiweError::DomainMismatch {
                    expected: expected.clone(),
                    found: message.domain.clone(),
                });
            }
        }

        if let Some(expected) = &options.nonce {
            let found = message.nonce.as_deref().unwrap_or_default();
            if expected != found {
                return Err(SiweError::NonceMismatch {
                    expected: expected.clone(),
                    found: found.to_string(),
                });
            }
        }

        let now = options.time.unwrap_or_else(|| self.clock.now());
        if message.is_expired_at(now) {
            return Err(SiweError::Expired(
                message.expiration_time.clone().unwrap_or_default(),
            ));
        }
        if message.is_not_yet_valid_at(now) {
            return Err(SiweError::NotYetValid(
                message.not_before.clone().unwrap_or_default(),
            ));
        }

        Ok(())
    }
}

/// The claimed address of signed text: its second non-empty line.
fn address_line(text: &str) -> &str {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .nth(1)
        .unwrap_or_default()
}

impl<R: SignatureRecovery> Clone for Siwe<R> {
    fn clone(&self) -> Self {
        Self {
            recovery: Arc::clone(&self.recovery),
            nonce: Arc::clone(&self.nonce),
            clock: Arc::clone(&self.clock),
            config: self.config.clone(),
        }
    }
}

impl Default for Siwe<Secp256k1Recovery> {
    fn default() -> Self {
        Self::new(Secp256k1Recovery, SiweConfig::default())
    }
}
