//! Main verification service implementation

use std::sync::Arc;

use crate::domain::value_objects::Identifier;
use crate::errors::{DomainError, DomainResult, VerificationError};

use super::traits::{CodeStore, NotifierTrait};
use super::types::IssueOutcome;

/// Verification service for issuing and checking one-time codes
pub struct VerificationService<N: NotifierTrait, C: CodeStore> {
    /// Delivery channel for issued codes
    notifier: Arc<N>,
    /// Store holding pending codes
    store: Arc<C>,
}

impl<N: NotifierTrait, C: CodeStore> VerificationService<N, C> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `notifier` - Delivery channel implementation
    /// * `store` - Code store implementation
    pub fn new(notifier: Arc<N>, store: Arc<C>) -> Self {
        Self { notifier, store }
    }

    /// Issue a verification code for an identifier and deliver it
    ///
    /// This method:
    /// 1. Normalizes the identifier and checks the notifier can reach it
    /// 2. Stores a fresh code, invalidating any previous one
    /// 3. Hands the code to the notifier
    ///
    /// A delivery failure is reported as
    /// `VerificationError::NotifierFailure` but the stored code is left in
    /// place, so a code that arrives late or through a resend still verifies.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Expiry and message ID, never the code itself
    /// * `Err(DomainError)` - If the identifier is invalid or delivery fails
    pub async fn issue(&self, identifier: &str) -> DomainResult<IssueOutcome> {
        let identifier = Identifier::parse(identifier)?;

        if !self.notifier.is_valid_identifier(identifier.as_str()) {
            return Err(DomainError::Validation {
                message: format!("Invalid identifier format: {}", identifier.masked()),
            });
        }

        let pending = self.store.issue(&identifier);

        tracing::info!(
            identifier = %identifier.masked(),
            expires_at = %pending.expires_at,
            event = "otp_issued",
            "Issued new verification code"
        );

        let message_id = self
            .notifier
            .send_verification_code(identifier.as_str(), &pending.code)
            .await
            .map_err(|reason| {
                tracing::error!(
                    identifier = %identifier.masked(),
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code, pending code retained"
                );
                VerificationError::NotifierFailure { reason }
            })?;

        tracing::debug!(
            identifier = %identifier.masked(),
            message_id = %message_id,
            event = "otp_delivered",
            "Verification code handed to notifier"
        );

        Ok(IssueOutcome {
            identifier,
            expires_at: pending.expires_at,
            message_id,
        })
    }

    /// Verify a submitted code for an identifier
    ///
    /// An identifier that is blank after normalization can never have been
    /// issued and yields `NotFound`. The submitted code is passed through
    /// untouched; malformed codes are plain mismatches.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The code matched and has been consumed
    /// * `Err(DomainError::Verification(_))` - `NotFound`, `Expired`,
    ///   `Mismatch` or `TooManyAttempts`
    pub async fn verify(&self, identifier: &str, code: &str) -> DomainResult<()> {
        let Ok(identifier) = Identifier::parse(identifier) else {
            return Err(VerificationError::NotFound.into());
        };

        match self.store.verify(&identifier, code) {
            Ok(()) => {
                tracing::info!(
                    identifier = %identifier.masked(),
                    event = "otp_verified_success",
                    "Verification code successfully verified"
                );
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    identifier = %identifier.masked(),
                    reason = %error,
                    event = "otp_verification_failed",
                    "Verification code rejected"
                );
                Err(error.into())
            }
        }
    }

    /// Drop expired codes from the store
    pub fn purge_expired(&self) -> usize {
        let purged = self.store.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, event = "otp_purged", "Purged expired verification codes");
        }
        purged
    }

    /// Number of codes currently pending
    pub fn pending_count(&self) -> usize {
        self.store.len()
    }
}
