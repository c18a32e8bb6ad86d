//! Unit tests for verification service

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::pending_verification::CODE_LENGTH;
use crate::errors::{DomainError, VerificationError};
use crate::services::verification::{Clock, ManualClock, VerificationPolicy, VerificationService};

use super::mocks::{MockCodeStore, MockNotifier};

struct Harness {
    service: VerificationService<MockNotifier, MockCodeStore>,
    notifier: Arc<MockNotifier>,
    store: Arc<MockCodeStore>,
    clock: Arc<ManualClock>,
}

fn harness_with(notifier_fails: bool, policy: VerificationPolicy) -> Harness {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
    ));
    let notifier = Arc::new(MockNotifier::new(notifier_fails));
    let store = Arc::new(MockCodeStore::new(clock.clone(), policy));
    let service = VerificationService::new(notifier.clone(), store.clone());
    Harness {
        service,
        notifier,
        store,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(false, VerificationPolicy::default())
}

fn verification_error(result: Result<(), DomainError>) -> VerificationError {
    match result {
        Err(DomainError::Verification(error)) => error,
        other => panic!("Expected verification error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_success() {
    let h = harness();

    let outcome = h.service.issue("a@x.com").await.unwrap();
    assert_eq!(outcome.identifier.as_str(), "a@x.com");
    assert_eq!(outcome.message_id, "mock-msg-a@x.com");
    assert_eq!(outcome.expires_at, h.clock.now() + Duration::minutes(10));
    assert_eq!(outcome.expires_in_seconds(h.clock.now()), 600);

    let sent = h.notifier.get_sent_code("a@x.com").unwrap();
    assert_eq!(sent.len(), CODE_LENGTH);
    assert!(h.store.contains("a@x.com"));
    assert_eq!(h.service.pending_count(), 1);
}

#[tokio::test]
async fn test_issue_normalizes_identifier() {
    let h = harness();

    h.service.issue("  A@X.Com ").await.unwrap();
    let code = h.notifier.get_sent_code("a@x.com").unwrap();

    h.service.verify("a@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn test_issue_rejects_blank_identifier() {
    let h = harness();

    match h.service.issue("   ").await {
        Err(DomainError::Validation { message }) => assert!(message.contains("empty")),
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert_eq!(h.notifier.sent_count(), 0);
    assert!(h.store.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_issue_rejects_identifier_notifier_cannot_reach() {
    let h = harness();

    match h.service.issue("not-an-email").await {
        Err(DomainError::Validation { message }) => {
            assert!(message.contains("Invalid identifier format"))
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert_eq!(h.service.pending_count(), 0);
}

#[tokio::test]
async fn test_verify_success_exactly_once() {
    let h = harness();
    h.service.issue("a@x.com").await.unwrap();
    let code = h.notifier.get_sent_code("a@x.com").unwrap();

    assert!(h.service.verify("a@x.com", &code).await.is_ok());
    assert_eq!(
        verification_error(h.service.verify("a@x.com", &code).await),
        VerificationError::NotFound
    );
    assert!(!h.store.contains("a@x.com"));
}

#[tokio::test]
async fn test_retry_after_mismatch() {
    let h = harness();
    h.service.issue("a@x.com").await.unwrap();
    let code = h.notifier.get_sent_code("a@x.com").unwrap();
    let wrong = if code == "999999" { "100000" } else { "999999" };

    assert_eq!(
        verification_error(h.service.verify("a@x.com", wrong).await),
        VerificationError::Mismatch
    );
    assert!(h.store.contains("a@x.com"));

    h.clock.advance(Duration::minutes(9));
    assert!(h.service.verify("a@x.com", &code).await.is_ok());
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let h = harness();

    h.service.issue("a@x.com").await.unwrap();
    let first = h.notifier.get_sent_code("a@x.com").unwrap();
    h.service.issue("a@x.com").await.unwrap();
    let second = h.notifier.get_sent_code("a@x.com").unwrap();

    assert_eq!(h.service.pending_count(), 1);
    if first != second {
        assert_eq!(
            verification_error(h.service.verify("a@x.com", &first).await),
            VerificationError::Mismatch
        );
    }
    assert!(h.service.verify("a@x.com", &second).await.is_ok());
}

#[tokio::test]
async fn test_expired_code_is_purged() {
    let h = harness();
    h.service.issue("a@x.com").await.unwrap();
    let code = h.notifier.get_sent_code("a@x.com").unwrap();

    h.clock.advance(Duration::minutes(10) + Duration::seconds(1));

    assert_eq!(
        verification_error(h.service.verify("a@x.com", &code).await),
        VerificationError::Expired
    );
    assert_eq!(
        verification_error(h.service.verify("a@x.com", &code).await),
        VerificationError::NotFound
    );
}

#[tokio::test]
async fn test_verify_never_issued() {
    let h = harness();

    assert_eq!(
        verification_error(h.service.verify("nobody@x.com", "123456").await),
        VerificationError::NotFound
    );
    assert_eq!(
        verification_error(h.service.verify("   ", "123456").await),
        VerificationError::NotFound
    );
}

#[tokio::test]
async fn test_attempt_limit_discards_code() {
    let h = harness_with(
        false,
        VerificationPolicy {
            max_attempts: Some(3),
            ..Default::default()
        },
    );
    h.service.issue("a@x.com").await.unwrap();
    let code = h.notifier.get_sent_code("a@x.com").unwrap();

    for _ in 0..2 {
        assert_eq!(
            verification_error(h.service.verify("a@x.com", "abc").await),
            VerificationError::Mismatch
        );
    }
    assert_eq!(
        verification_error(h.service.verify("a@x.com", "abc").await),
        VerificationError::TooManyAttempts
    );
    assert_eq!(
        verification_error(h.service.verify("a@x.com", &code).await),
        VerificationError::NotFound
    );
}

#[tokio::test]
async fn test_notifier_failure_keeps_pending_code() {
    let h = harness_with(true, VerificationPolicy::default());

    match h.service.issue("a@x.com").await {
        Err(DomainError::Verification(VerificationError::NotifierFailure { reason })) => {
            assert!(reason.contains("Email service error"))
        }
        other => panic!("Expected notifier failure, got {:?}", other),
    }

    // The code never reached the user, but the entry is still as issued
    let key = crate::domain::value_objects::Identifier::parse("a@x.com").unwrap();
    let code = h.store.entries.lock().unwrap().get(&key).unwrap().code.clone();
    assert!(h.service.verify("a@x.com", &code).await.is_ok());
}

#[tokio::test]
async fn test_purge_expired() {
    let h = harness();
    h.service.issue("old@x.com").await.unwrap();
    h.clock.advance(Duration::minutes(8));
    h.service.issue("new@x.com").await.unwrap();
    h.clock.advance(Duration::minutes(3));

    assert_eq!(h.service.purge_expired(), 1);
    assert!(!h.store.contains("old@x.com"));
    assert!(h.store.contains("new@x.com"));
    assert_eq!(h.service.purge_expired(), 0);
}
