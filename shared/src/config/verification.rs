//! Verification code configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// Default lifetime of an issued code
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;

/// Longest accepted code lifetime (one day)
pub const MAX_CODE_TTL_MINUTES: i64 = 24 * 60;

/// Default number of wrong guesses before a pending code is discarded
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default period of the background expiry sweep
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Settings governing issued verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a code stays valid after issuance
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,

    /// Mismatched attempts allowed per code, `0` disables the limit
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds between expiry sweeps, `0` disables sweeping
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl VerificationConfig {
    /// Load from `VERIFICATION_CODE_TTL_MINUTES`, `VERIFICATION_MAX_ATTEMPTS`
    /// and `VERIFICATION_SWEEP_INTERVAL_SECS`
    pub fn from_env() -> Self {
        let ttl = env_or("VERIFICATION_CODE_TTL_MINUTES", DEFAULT_CODE_TTL_MINUTES);
        Self {
            code_ttl_minutes: if is_valid_ttl(ttl) { ttl } else { DEFAULT_CODE_TTL_MINUTES },
            max_attempts: env_or("VERIFICATION_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            sweep_interval_secs: env_or(
                "VERIFICATION_SWEEP_INTERVAL_SECS",
                DEFAULT_SWEEP_INTERVAL_SECS,
            ),
        }
    }

    /// Whether the TTL lies within `1..=MAX_CODE_TTL_MINUTES`
    pub fn has_valid_ttl(&self) -> bool {
        is_valid_ttl(self.code_ttl_minutes)
    }

    /// Attempt limit, `None` when unlimited
    pub fn attempt_limit(&self) -> Option<u32> {
        (self.max_attempts > 0).then_some(self.max_attempts)
    }

    /// Sweep period, `None` when sweeping is disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

fn is_valid_ttl(minutes: i64) -> bool {
    (1..=MAX_CODE_TTL_MINUTES).contains(&minutes)
}

fn default_code_ttl_minutes() -> i64 {
    DEFAULT_CODE_TTL_MINUTES
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_sweep_interval_secs() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}
