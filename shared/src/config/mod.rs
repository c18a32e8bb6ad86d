//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `email` - Outbound email provider used to deliver codes
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding
//! - `verification` - Code lifetime, attempt budget and sweeping

pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Every section falls back to its defaults for unset or unparsable
    /// variables, so an empty environment yields a working development setup.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            verification: VerificationConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.verification.code_ttl_minutes, 10);
        assert_eq!(config.email.provider, EmailProvider::Mock);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_or_falls_back_on_missing_key() {
        let value: u64 = env_or("VC_SHARED_TEST_SURELY_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
