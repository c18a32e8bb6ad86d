//! Tests for the in-memory verification code store

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{Duration, TimeZone, Utc};

use vc_core::domain::entities::{CODE_LENGTH, CODE_MAX, CODE_MIN};
use vc_core::domain::value_objects::Identifier;
use vc_core::errors::VerificationError;
use vc_core::services::verification::{CodeStore, ManualClock, VerificationPolicy};

use crate::cache::InMemoryCodeStore;

fn id(raw: &str) -> Identifier {
    Identifier::parse(raw).unwrap()
}

fn store_with(policy: VerificationPolicy) -> (InMemoryCodeStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap(),
    ));
    (InMemoryCodeStore::with_clock(policy, clock.clone()), clock)
}

fn store() -> (InMemoryCodeStore, Arc<ManualClock>) {
    store_with(VerificationPolicy::default())
}

fn wrong_code(code: &str) -> &'static str {
    if code == "100000" {
        "100001"
    } else {
        "100000"
    }
}

#[test]
fn test_starts_empty() {
    let (store, _) = store();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.verify(&id("a@x.com"), "123456"), Err(VerificationError::NotFound));
}

#[test]
fn test_issue_then_verify_once() {
    let (store, _) = store();
    let issued = store.issue(&id("a@x.com"));

    assert_eq!(issued.code.len(), CODE_LENGTH);
    assert_eq!(store.len(), 1);

    assert_eq!(store.verify(&id("a@x.com"), &issued.code), Ok(()));
    assert_eq!(
        store.verify(&id("a@x.com"), &issued.code),
        Err(VerificationError::NotFound)
    );
    assert!(store.is_empty());
}

#[test]
fn test_issue_sets_ttl_from_policy() {
    let (store, clock) = store_with(VerificationPolicy {
        code_ttl: Duration::minutes(3),
        max_attempts: None,
    });
    let issued = store.issue(&id("a@x.com"));

    assert_eq!(issued.created_at, vc_core::Clock::now(clock.as_ref()));
    assert_eq!(issued.expires_at, issued.created_at + Duration::minutes(3));
}

#[test]
fn test_mismatch_then_retry() {
    let (store, clock) = store();
    let issued = store.issue(&id("a@x.com"));

    assert_eq!(
        store.verify(&id("a@x.com"), wrong_code(&issued.code)),
        Err(VerificationError::Mismatch)
    );
    assert_eq!(store.len(), 1);

    clock.advance(Duration::minutes(5));
    assert_eq!(store.verify(&id("a@x.com"), &issued.code), Ok(()));
}

#[test]
fn test_reissue_replaces_entry() {
    let (store, _) = store();
    let first = store.issue(&id("a@x.com"));
    let second = store.issue(&id("a@x.com"));

    assert_eq!(store.len(), 1);
    if first.code != second.code {
        assert_eq!(
            store.verify(&id("a@x.com"), &first.code),
            Err(VerificationError::Mismatch)
        );
    }
    assert_eq!(store.verify(&id("a@x.com"), &second.code), Ok(()));
}

#[test]
fn test_reissue_resets_attempt_budget() {
    let (store, _) = store_with(VerificationPolicy {
        max_attempts: Some(2),
        ..Default::default()
    });
    let first = store.issue(&id("a@x.com"));
    assert_eq!(
        store.verify(&id("a@x.com"), wrong_code(&first.code)),
        Err(VerificationError::Mismatch)
    );

    let second = store.issue(&id("a@x.com"));
    assert_eq!(
        store.verify(&id("a@x.com"), wrong_code(&second.code)),
        Err(VerificationError::Mismatch)
    );
    assert_eq!(store.verify(&id("a@x.com"), &second.code), Ok(()));
}

#[test]
fn test_expired_entry_is_deleted_on_verify() {
    let (store, clock) = store();
    let issued = store.issue(&id("a@x.com"));

    clock.advance(Duration::minutes(10) + Duration::seconds(1));

    assert_eq!(
        store.verify(&id("a@x.com"), &issued.code),
        Err(VerificationError::Expired)
    );
    assert!(store.is_empty());
    assert_eq!(
        store.verify(&id("a@x.com"), &issued.code),
        Err(VerificationError::NotFound)
    );
}

#[test]
fn test_expired_entry_with_wrong_code_reports_expired() {
    let (store, clock) = store();
    let issued = store.issue(&id("a@x.com"));

    clock.advance(Duration::hours(1));
    assert_eq!(
        store.verify(&id("a@x.com"), wrong_code(&issued.code)),
        Err(VerificationError::Expired)
    );
}

#[test]
fn test_malformed_codes_do_not_consume() {
    let (store, _) = store_with(VerificationPolicy::default().unlimited_attempts());
    let issued = store.issue(&id("a@x.com"));

    for submitted in ["", "12", "abcdef", "1234567", "12 456", "１２３４５６"] {
        assert_eq!(
            store.verify(&id("a@x.com"), submitted),
            Err(VerificationError::Mismatch)
        );
    }
    assert_eq!(store.verify(&id("a@x.com"), &issued.code), Ok(()));
}

#[test]
fn test_attempt_limit() {
    let (store, _) = store_with(VerificationPolicy {
        max_attempts: Some(3),
        ..Default::default()
    });
    let issued = store.issue(&id("a@x.com"));
    let wrong = wrong_code(&issued.code);

    assert_eq!(store.verify(&id("a@x.com"), wrong), Err(VerificationError::Mismatch));
    assert_eq!(store.verify(&id("a@x.com"), wrong), Err(VerificationError::Mismatch));
    assert_eq!(
        store.verify(&id("a@x.com"), wrong),
        Err(VerificationError::TooManyAttempts)
    );
    assert_eq!(
        store.verify(&id("a@x.com"), &issued.code),
        Err(VerificationError::NotFound)
    );
}

#[test]
fn test_identifiers_are_independent() {
    let (store, _) = store();
    let a = store.issue(&id("a@x.com"));
    let b = store.issue(&id("b@x.com"));

    assert_eq!(store.len(), 2);
    assert_eq!(store.verify(&id("a@x.com"), &a.code), Ok(()));
    assert_eq!(store.len(), 1);
    assert_eq!(store.verify(&id("b@x.com"), &b.code), Ok(()));
}

#[test]
fn test_normalized_identifiers_share_entry() {
    let (store, _) = store();
    let issued = store.issue(&id(" A@X.COM"));

    assert_eq!(store.verify(&id("a@x.com  "), &issued.code), Ok(()));
}

#[test]
fn test_purge_expired_only_removes_expired() {
    let (store, clock) = store();
    store.issue(&id("old@x.com"));
    clock.advance(Duration::minutes(6));
    let fresh = store.issue(&id("fresh@x.com"));
    clock.advance(Duration::minutes(5));

    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.verify(&id("fresh@x.com"), &fresh.code), Ok(()));
    assert_eq!(store.purge_expired(), 0);
}

#[test]
fn test_generated_codes_cover_range() {
    let (store, _) = store();
    let mut seen = HashSet::new();
    for i in 0..2_000 {
        let issued = store.issue(&id(&format!("user{}@x.com", i)));
        let value: u32 = issued.code.parse().unwrap();
        assert!((CODE_MIN..=CODE_MAX).contains(&value));
        seen.insert(issued.code);
    }
    assert!(seen.len() > 1_900);
    assert_eq!(store.len(), 2_000);
}

#[test]
fn test_concurrent_verify_succeeds_exactly_once() {
    let (store, _) = store();
    let store = Arc::new(store);
    let issued = store.issue(&id("race@x.com"));

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let store = store.clone();
            let barrier = barrier.clone();
            let code = issued.code.clone();
            thread::spawn(move || {
                barrier.wait();
                store.verify(&id("race@x.com"), &code)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter(|r| r.is_err())
        .all(|r| *r == Err(VerificationError::NotFound)));
}

#[test]
fn test_concurrent_issue_leaves_single_entry() {
    let (store, _) = store_with(VerificationPolicy::default().unlimited_attempts());
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || store.issue(&id("busy@x.com")))
        })
        .collect();
    let codes: Vec<String> = handles.into_iter().map(|h| h.join().unwrap().code).collect();

    assert_eq!(store.len(), 1);
    // Exactly one of the issued codes is the live one
    let live = codes
        .iter()
        .filter(|code| store.verify(&id("busy@x.com"), code).is_ok())
        .count();
    assert_eq!(live, 1);
}
