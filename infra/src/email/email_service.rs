//! Email Service Interface
//!
//! Defines the trait for email providers that deliver verification codes,
//! and the message template they share.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Subject used when a provider does not configure its own
pub const DEFAULT_SUBJECT: &str = "Your Verification Code";

/// Email service trait for sending messages
///
/// Implementations include:
/// - Resend HTTP API
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an HTML email to a single recipient
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code using the standard template
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let html = render_verification_html(code, ttl_minutes);
        self.send_email(to, self.verification_subject(), &html).await
    }

    /// Subject line for verification emails
    fn verification_subject(&self) -> &str {
        DEFAULT_SUBJECT
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

/// Render the HTML body carrying a verification code
pub fn render_verification_html(code: &str, ttl_minutes: i64) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <p style="color: #334155;">Use the code below to finish signing in.</p>
  <div style="background-color: #f1f5f9; padding: 20px; border-radius: 8px; text-align: center; margin: 20px 0;">
    <h1 style="color: #0f172a; letter-spacing: 8px; font-size: 32px; margin: 0;">{code}</h1>
  </div>
  <p style="color: #64748b; font-size: 14px;">This code expires in {ttl_minutes} minutes. If you did not request it, you can ignore this email.</p>
</div>"#
    )
}
