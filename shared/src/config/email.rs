//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Supported outbound email providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log-only provider for development and tests
    #[default]
    Mock,
    /// Resend HTTP API
    Resend,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "resend" => Ok(EmailProvider::Resend),
            other => Err(format!("Unknown email provider: {}", other)),
        }
    }
}

impl std::fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailProvider::Mock => write!(f, "mock"),
            EmailProvider::Resend => write!(f, "resend"),
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider used to deliver verification codes
    #[serde(default)]
    pub provider: EmailProvider,

    /// Provider API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Sender address, e.g. `VerifyCode <no-reply@example.com>`
    pub from_address: String,

    /// Subject line of the verification email
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Timeout for provider API requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_key: None,
            from_address: String::from("VerifyCode <no-reply@localhost>"),
            subject: default_subject(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Load from `EMAIL_PROVIDER`, `EMAIL_API_KEY`, `EMAIL_FROM_ADDRESS`,
    /// `EMAIL_SUBJECT` and `EMAIL_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            api_key: std::env::var("EMAIL_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            from_address: std::env::var("EMAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            subject: std::env::var("EMAIL_SUBJECT").unwrap_or(defaults.subject),
            request_timeout_secs: super::env_or(
                "EMAIL_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }

    /// Whether the provider has the credentials it needs
    pub fn is_configured(&self) -> bool {
        match self.provider {
            EmailProvider::Mock => true,
            EmailProvider::Resend => self.api_key.is_some() && !self.from_address.trim().is_empty(),
        }
    }
}

fn default_subject() -> String {
    String::from("Your Verification Code")
}

fn default_request_timeout_secs() -> u64 {
    30
}
