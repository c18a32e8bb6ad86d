//! # Infrastructure Layer
//!
//! Concrete implementations behind the core verification seams:
//! - **Cache**: Concurrent in-memory code store and the expiry sweeper
//! - **Email**: Email delivery providers (Resend, mock)

// Re-export core types for convenience
pub use vc_core::errors::*;

/// Cache module - In-memory code store and background sweeping
pub mod cache;

/// Email module - Outbound email providers
pub mod email;

use std::sync::Arc;

use vc_core::services::verification::{VerificationPolicy, VerificationService};
use vc_shared::config::verification::MAX_CODE_TTL_MINUTES;
use vc_shared::config::AppConfig;

use crate::cache::{spawn_expiry_sweeper, InMemoryCodeStore, SweeperHandle};
use crate::email::{create_email_service, EmailNotifierAdapter};

/// Verification service wired to the infrastructure implementations
pub type AppVerificationService = VerificationService<EmailNotifierAdapter, InMemoryCodeStore>;

/// Infrastructure service container
pub struct InfrastructureServices {
    /// Pending verification codes
    pub store: Arc<InMemoryCodeStore>,
    /// Email delivery
    pub notifier: Arc<EmailNotifierAdapter>,
    /// Background expiry sweep, if enabled
    pub sweeper: Option<SweeperHandle>,
}

impl InfrastructureServices {
    /// Build a verification service over these components
    pub fn verification_service(&self) -> AppVerificationService {
        VerificationService::new(self.notifier.clone(), self.store.clone())
    }
}

/// Initialize infrastructure services
///
/// Must be called from within a tokio runtime when the sweep interval is
/// non-zero, since the sweeper is spawned here.
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    if !config.verification.has_valid_ttl() {
        return Err(InfrastructureError::Config(format!(
            "Verification code TTL must be between 1 and {} minutes, got {}",
            MAX_CODE_TTL_MINUTES, config.verification.code_ttl_minutes
        )));
    }

    let policy = VerificationPolicy::from(&config.verification);
    let store = Arc::new(InMemoryCodeStore::new(policy));

    let email = create_email_service(&config.email, config.environment)?;
    tracing::info!(provider = email.provider_name(), "Email service ready");
    if config.environment.is_production() && email.provider_name() == "Mock" {
        tracing::warn!("Using mock email service in production; codes will not be delivered");
    }
    let notifier = Arc::new(EmailNotifierAdapter::new(
        email,
        config.verification.code_ttl_minutes,
    ));

    let sweeper = config
        .verification
        .sweep_interval()
        .map(|interval| spawn_expiry_sweeper(store.clone(), interval));
    if sweeper.is_none() {
        tracing::warn!("Expiry sweeper disabled; expired codes are only dropped on verify");
    }

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        store,
        notifier,
        sweeper,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),
}
