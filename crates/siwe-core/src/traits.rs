//! Capability traits for the collaborators the core does not implement.
//!
//! The serializer needs a nonce source and a clock, the verifier needs
//! signature recovery. Each is a trait so tests can substitute
//! deterministic fakes and the core never depends on a concrete
//! cryptography backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::error::RecoveryError;
use crate::types::{Address, Signature};

/// Recovers the account that produced a signature over a message.
///
/// Implementations must be thread-safe (Send + Sync). Recovery is the only
/// suspension point of verification; callers wrap it in their own timeout
/// when they need one.
#[async_trait]
pub trait SignatureRecovery: Send + Sync {
    /// Recover the signing address for `message` (the exact signed text).
    async fn recover_address(
        &self,
        message: &str,
        signature: &Signature,
    ) -> Result<Address, RecoveryError>;
}

#[async_trait]
impl<T: SignatureRecovery + ?Sized> SignatureRecovery for Arc<T> {
    async fn recover_address(
        &self,
        message: &str,
        signature: &Signature,
    ) -> Result<Address, RecoveryError> {
        (**self).recover_address(message, signature).await
    }
}

/// Produces unpredictable nonces of at least 8 characters.
pub trait NonceGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> NonceGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
