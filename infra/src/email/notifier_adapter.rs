//! Email Notifier Adapter
//!
//! Implements the core `NotifierTrait` on top of any [`EmailService`],
//! bridging the infrastructure providers with the verification service.

use async_trait::async_trait;

use vc_core::services::verification::NotifierTrait;
use vc_shared::utils::email::is_valid_email;

use super::email_service::EmailService;

/// Adapter that delivers verification codes by email
pub struct EmailNotifierAdapter {
    inner: Box<dyn EmailService>,
    code_ttl_minutes: i64,
}

impl EmailNotifierAdapter {
    /// Wrap an email service; `code_ttl_minutes` is quoted in the message
    pub fn new(inner: Box<dyn EmailService>, code_ttl_minutes: i64) -> Self {
        Self {
            inner,
            code_ttl_minutes,
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    /// Health of the underlying provider
    pub async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[async_trait]
impl NotifierTrait for EmailNotifierAdapter {
    async fn send_verification_code(&self, identifier: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(identifier, code, self.code_ttl_minutes)
            .await
            .map_err(|e| e.to_string())
    }

    fn is_valid_identifier(&self, identifier: &str) -> bool {
        is_valid_email(identifier)
    }
}
