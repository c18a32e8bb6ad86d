//! Email Service Module
//!
//! Email delivery for verification codes:
//! - **Email Service Trait**: Common interface for all providers
//! - **Mock Implementation**: Logs mail for development and tests
//! - **Resend Support**: Production delivery via the Resend API
//! - **Notifier Adapter**: Plugs any provider into the verification service

pub mod email_service;
pub mod mock_email;
pub mod notifier_adapter;
pub mod resend;

pub use email_service::{render_verification_html, EmailService, DEFAULT_SUBJECT};
pub use mock_email::MockEmailService;
pub use notifier_adapter::EmailNotifierAdapter;
pub use resend::{ResendConfig, ResendEmailService};

use vc_shared::config::{EmailConfig, EmailProvider, Environment};

use crate::InfrastructureError;


/// Create an email service based on configuration
///
/// The mock prints codes to the console only in development. Outside
/// production a provider that cannot be initialized falls back to a silent
/// mock so the service still starts; in production it is a configuration
/// error, since codes would never reach their recipients.
pub fn create_email_service(
    config: &EmailConfig,
    environment: Environment,
) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => Ok(Box::new(MockEmailService::with_options(
            environment.is_development(),
            false,
        ))),
        EmailProvider::Resend => {
            match ResendConfig::from_email_config(config).and_then(ResendEmailService::new) {
                Ok(service) => Ok(Box::new(service)),
                Err(e) if environment.is_production() => {
                    tracing::error!("Failed to initialize Resend email service: {}", e);
                    Err(InfrastructureError::Config(format!(
                        "Email provider {} is unavailable in {}: {}",
                        config.provider, environment, e
                    )))
                }
                Err(e) => {
                    tracing::error!("Failed to initialize Resend email service: {}", e);
                    tracing::warn!("Falling back to mock email service");
                    Ok(Box::new(fallback_mock_service()))
                }
            }
        }
    }
}

/// Stand-in for an unavailable provider, never echoes codes
fn fallback_mock_service() -> MockEmailService {
    MockEmailService::with_options(false, false)
}
