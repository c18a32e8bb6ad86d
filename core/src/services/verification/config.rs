//! Configuration for the verification code store

use chrono::Duration;
use vc_shared::config::verification::MAX_CODE_TTL_MINUTES;
use vc_shared::config::VerificationConfig;

use crate::domain::entities::pending_verification::DEFAULT_EXPIRATION_MINUTES;

/// Default number of mismatches tolerated per issued code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Rules applied to every issued code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationPolicy {
    /// How long a code stays valid after issuance
    pub code_ttl: Duration,
    /// Mismatches allowed before the code is discarded, `None` for unlimited
    pub max_attempts: Option<u32>,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl VerificationPolicy {
    /// Policy with no attempt limit
    pub fn unlimited_attempts(mut self) -> Self {
        self.max_attempts = None;
        self
    }
}

impl From<&VerificationConfig> for VerificationPolicy {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl: Duration::minutes(config.code_ttl_minutes.clamp(1, MAX_CODE_TTL_MINUTES)),
            max_attempts: config.attempt_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = VerificationPolicy::default();
        assert_eq!(policy.code_ttl, Duration::minutes(10));
        assert_eq!(policy.max_attempts, Some(5));
        assert_eq!(policy.unlimited_attempts().max_attempts, None);
    }

    #[test]
    fn test_from_shared_config() {
        let config = VerificationConfig {
            code_ttl_minutes: 3,
            max_attempts: 0,
            sweep_interval_secs: 0,
        };
        let policy = VerificationPolicy::from(&config);
        assert_eq!(policy.code_ttl, Duration::minutes(3));
        assert_eq!(policy.max_attempts, None);
    }

    #[test]
    fn test_out_of_range_ttl_is_clamped() {
        let huge = VerificationConfig {
            code_ttl_minutes: 200_000_000_000,
            ..Default::default()
        };
        assert_eq!(
            VerificationPolicy::from(&huge).code_ttl,
            Duration::minutes(MAX_CODE_TTL_MINUTES)
        );

        let negative = VerificationConfig {
            code_ttl_minutes: -1,
            ..Default::default()
        };
        assert_eq!(VerificationPolicy::from(&negative).code_ttl, Duration::minutes(1));
    }
}
