//! Mock Email Service Implementation
//!
//! Logs outgoing mail instead of sending it. Used in development and tests,
//! and as the fallback when a real provider cannot be configured.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use vc_shared::utils::email::{is_valid_email, mask_email};

use super::email_service::EmailService;
use crate::InfrastructureError;

/// Mock email service for development and testing
///
/// This implementation:
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Remembers the last code sent to each recipient
/// - Optionally prints codes to stdout for local sign-in
#[derive(Clone)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last verification code per recipient
    sent_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures
    simulate_failure: bool,
    /// Whether to print codes to the console
    console_output: bool,
}

impl MockEmailService {
    /// Create a new mock email service that prints codes to the console
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure,
            console_output,
        }
    }

    /// Whether sent codes are echoed to the console
    pub fn prints_codes(&self) -> bool {
        self.console_output
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last verification code sent to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent_codes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(to)
            .cloned()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    fn check_send(&self, to: &str) -> Result<(), InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_email(to)
            )));
        }

        if self.simulate_failure {
            warn!(
                recipient = %mask_email(to),
                "Mock email service simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<String, InfrastructureError> {
        self.check_send(to)?;

        let message_id = format!("mock_{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            target: "email_service",
            provider = "mock",
            recipient = %mask_email(to),
            message_id = %message_id,
            subject = %subject,
            body_length = html.len(),
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }

    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let html = super::email_service::render_verification_html(code, ttl_minutes);
        let message_id = self.send_email(to, self.verification_subject(), &html).await?;

        self.sent_codes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(to.to_string(), code.to_string());

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL - VERIFICATION CODE");
            println!("To: {}", to);
            println!("Code: {} (expires in {} minutes)", code, ttl_minutes);
            println!("{}\n", "=".repeat(60));
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
