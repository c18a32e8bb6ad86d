//! In-memory verification code store
//!
//! Pending codes live in a sharded [`DashMap`] keyed by the normalized
//! identifier:
//! - Issue overwrites the entry for its key
//! - Verify runs its check-then-delete under the key's shard lock
//! - Expired entries are dropped lazily on verify, or in bulk by
//!   [`purge_expired`](CodeStore::purge_expired)
//!
//! Nothing is persisted; the store starts empty with the process.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use vc_core::domain::entities::PendingVerification;
use vc_core::domain::value_objects::Identifier;
use vc_core::errors::VerificationError;
use vc_core::services::verification::{Clock, CodeStore, SystemClock, VerificationPolicy};

/// Concurrent, expiring store of pending verification codes
///
/// Operations on one identifier are serialized by the shard lock that owns
/// its key; operations on identifiers in other shards proceed in parallel.
pub struct InMemoryCodeStore {
    /// Pending codes by normalized identifier
    entries: DashMap<Identifier, PendingVerification>,
    /// TTL and attempt budget applied to every code
    policy: VerificationPolicy,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
}

impl InMemoryCodeStore {
    /// Create an empty store using the system clock
    pub fn new(policy: VerificationPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create an empty store driven by the given clock
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use vc_core::services::verification::{ManualClock, VerificationPolicy};
    /// use vc_infra::cache::InMemoryCodeStore;
    ///
    /// let clock = Arc::new(ManualClock::default());
    /// let store = InMemoryCodeStore::with_clock(VerificationPolicy::default(), clock);
    /// ```
    pub fn with_clock(policy: VerificationPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
            clock,
        }
    }

    /// The policy this store enforces
    pub fn policy(&self) -> VerificationPolicy {
        self.policy
    }
}

impl Default for InMemoryCodeStore {
    fn default() -> Self {
        Self::new(VerificationPolicy::default())
    }
}

impl CodeStore for InMemoryCodeStore {
    fn issue(&self, identifier: &Identifier) -> PendingVerification {
        let entry = PendingVerification::new(identifier.clone(), self.clock.now(), self.policy.code_ttl);

        if self.entries.insert(identifier.clone(), entry.clone()).is_some() {
            debug!(
                identifier = %identifier.masked(),
                event = "otp_superseded",
                "Replaced pending verification code"
            );
        }

        entry
    }

    fn verify(&self, identifier: &Identifier, submitted_code: &str) -> Result<(), VerificationError> {
        let now = self.clock.now();

        // The entry guard holds the shard write lock until the match ends,
        // so no other call can observe the entry between check and delete.
        match self.entries.entry(identifier.clone()) {
            Entry::Vacant(_) => Err(VerificationError::NotFound),
            Entry::Occupied(mut occupied) => {
                let outcome = occupied
                    .get_mut()
                    .attempt(submitted_code, now, self.policy.max_attempts);
                if outcome.consumes_entry() {
                    occupied.remove();
                }
                outcome.into_result()
            }
        }
    }

    fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
