//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::value_objects::Identifier;

/// Result of issuing a verification code
///
/// Deliberately carries no code: the code only travels to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueOutcome {
    /// Normalized identifier the code was issued for
    pub identifier: Identifier,
    /// When the issued code stops being valid
    pub expires_at: DateTime<Utc>,
    /// The notifier's message ID
    pub message_id: String,
}

impl IssueOutcome {
    /// Whole seconds until the code expires, never negative
    pub fn expires_in_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
