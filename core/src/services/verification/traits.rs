//! Traits for notifier and code store integration

use async_trait::async_trait;

use crate::domain::entities::PendingVerification;
use crate::domain::value_objects::Identifier;
use crate::errors::VerificationError;

/// Trait for the delivery channel that carries codes to users
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    /// Deliver a verification code, returning the provider's message ID
    async fn send_verification_code(&self, identifier: &str, code: &str) -> Result<String, String>;
    /// Check whether the identifier is something this channel can deliver to
    fn is_valid_identifier(&self, identifier: &str) -> bool;
}

/// Trait for the in-process store of pending verifications
///
/// Every operation is synchronous and bounded-time. Read-modify-write
/// sequences on one identifier must be atomic with respect to other
/// operations on the same identifier.
pub trait CodeStore: Send + Sync {
    /// Generate and store a code for `identifier`, replacing any pending one
    fn issue(&self, identifier: &Identifier) -> PendingVerification;
    /// Check `submitted_code` against the pending entry, consuming it on
    /// success, expiry or exhausted attempts
    fn verify(&self, identifier: &Identifier, submitted_code: &str) -> Result<(), VerificationError>;
    /// Drop every expired entry, returning how many were removed
    fn purge_expired(&self) -> usize;
    /// Number of pending entries, expired ones included until purged
    fn len(&self) -> usize;
    /// Whether there are no pending entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
