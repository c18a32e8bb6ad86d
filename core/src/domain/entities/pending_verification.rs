//! Pending verification entity for email-based one-time passcodes.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

use crate::domain::value_objects::Identifier;
use crate::errors::VerificationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued (codes never start with a zero)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A code issued for an identifier and not yet consumed
///
/// At most one of these exists per identifier. It is destroyed by a
/// successful verification, by the first verification that finds it expired,
/// by exhausting its attempt budget, or by a newer issuance for the same
/// identifier.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingVerification {
    /// Normalized identifier this code was issued for
    pub identifier: Identifier,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code can no longer be verified
    pub expires_at: DateTime<Utc>,

    /// Number of mismatched verification attempts so far
    pub failed_attempts: u32,
}

/// Result of checking a submitted code against a pending entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Code matched before expiry
    Verified,
    /// Entry was already past its expiry
    Expired,
    /// Code did not match, entry stays for another try
    Mismatch,
    /// Code did not match and the attempt budget is spent
    AttemptsExhausted,
}

impl AttemptOutcome {
    /// Whether the pending entry must be deleted after this outcome
    pub fn consumes_entry(self) -> bool {
        !matches!(self, AttemptOutcome::Mismatch)
    }

    /// Convert into the verification result reported to callers
    pub fn into_result(self) -> Result<(), VerificationError> {
        match self {
            AttemptOutcome::Verified => Ok(()),
            AttemptOutcome::Expired => Err(VerificationError::Expired),
            AttemptOutcome::Mismatch => Err(VerificationError::Mismatch),
            AttemptOutcome::AttemptsExhausted => Err(VerificationError::TooManyAttempts),
        }
    }
}

impl PendingVerification {
    /// Creates a new pending verification with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `identifier` - The normalized identifier the code is issued for
    /// * `now` - Issuance time
    /// * `ttl` - How long the code stays valid
    pub fn new(identifier: Identifier, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(identifier, Self::generate_code(), now, ttl)
    }

    /// Creates a pending verification around a known code
    pub fn with_code(
        identifier: Identifier,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            identifier,
            code: code.into(),
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            failed_attempts: 0,
        }
    }

    /// Generates a 6-digit code uniformly from `[CODE_MIN, CODE_MAX]`
    ///
    /// Uses the OS CSPRNG; `gen_range` rejects out-of-zone samples so no
    /// value is favoured.
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Checks if the code has expired at `now`
    ///
    /// The code is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a submitted code against the stored one in constant time
    ///
    /// Malformed input of any length is simply unequal.
    pub fn matches(&self, submitted_code: &str) -> bool {
        self.code.len() == submitted_code.len()
            && constant_time_eq(self.code.as_bytes(), submitted_code.as_bytes())
    }

    /// Records a verification attempt and decides its outcome
    ///
    /// Expiry is checked before the code comparison, so an expired entry never
    /// verifies even with the right code. A mismatch increments the failure
    /// counter; when `max_attempts` is set and reached the outcome becomes
    /// [`AttemptOutcome::AttemptsExhausted`].
    pub fn attempt(
        &mut self,
        submitted_code: &str,
        now: DateTime<Utc>,
        max_attempts: Option<u32>,
    ) -> AttemptOutcome {
        if self.is_expired_at(now) {
            return AttemptOutcome::Expired;
        }

        if self.matches(submitted_code) {
            return AttemptOutcome::Verified;
        }

        self.failed_attempts = self.failed_attempts.saturating_add(1);
        match max_attempts {
            Some(limit) if self.failed_attempts >= limit => AttemptOutcome::AttemptsExhausted,
            _ => AttemptOutcome::Mismatch,
        }
    }

    /// Gets the number of remaining attempts, `None` when unlimited
    pub fn remaining_attempts(&self, max_attempts: Option<u32>) -> Option<u32> {
        max_attempts.map(|limit| limit.saturating_sub(self.failed_attempts))
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

// The code must never reach logs through `{:?}`
impl fmt::Debug for PendingVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingVerification")
            .field("identifier", &self.identifier.masked())
            .field("code", &"******")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("failed_attempts", &self.failed_attempts)
            .finish()
    }
}
