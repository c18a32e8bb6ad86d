//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures of the issue and verify operations
///
/// Every variant is recoverable by the caller: the user is asked to re-enter
/// the code or request a new one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// No pending code for the identifier (never issued, already consumed,
    /// or expired and cleaned up)
    #[error("No verification code found")]
    NotFound,

    /// The code outlived its TTL; the entry has been purged
    #[error("Verification code expired")]
    Expired,

    /// Wrong code; the entry is kept for another attempt
    #[error("Invalid verification code")]
    Mismatch,

    /// Wrong code and the attempt budget is spent; the entry has been purged
    #[error("Maximum verification attempts exceeded")]
    TooManyAttempts,

    /// The delivery channel failed; the issued entry is kept
    #[error("Failed to deliver verification code: {reason}")]
    NotifierFailure { reason: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
