//! Unit tests for domain error types

use crate::errors::{DomainError, VerificationError};

#[test]
fn test_verification_error_messages() {
    assert_eq!(VerificationError::NotFound.to_string(), "No verification code found");
    assert_eq!(VerificationError::Expired.to_string(), "Verification code expired");
    assert_eq!(VerificationError::Mismatch.to_string(), "Invalid verification code");
    assert!(VerificationError::TooManyAttempts
        .to_string()
        .contains("Maximum verification attempts"));

    let error = VerificationError::NotifierFailure {
        reason: "provider returned 500".to_string(),
    };
    assert!(error.to_string().contains("provider returned 500"));
}

#[test]
fn test_domain_error_wraps_verification_error_transparently() {
    let error: DomainError = VerificationError::Expired.into();
    assert_eq!(error.to_string(), "Verification code expired");
    assert!(matches!(
        error,
        DomainError::Verification(VerificationError::Expired)
    ));
}

#[test]
fn test_validation_error_message() {
    let error = DomainError::Validation {
        message: "Invalid email address".to_string(),
    };
    assert_eq!(error.to_string(), "Validation error: Invalid email address");
}
