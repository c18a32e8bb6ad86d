//! Resend Email Service Implementation
//!
//! Delivers mail through the Resend HTTP API (`POST /emails`). Failed
//! requests are retried with exponential backoff when the status suggests
//! the error is transient.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use vc_shared::config::EmailConfig;
use vc_shared::utils::email::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// Production Resend endpoint
pub const RESEND_API_BASE: &str = "https://api.resend.com";

/// Resend service configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key, sent as a bearer token
    pub api_key: String,
    /// Sender, e.g. `VerifyCode <no-reply@example.com>`
    pub from_address: String,
    /// Subject line for verification emails
    pub subject: String,
    /// API base URL
    pub base_url: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl ResendConfig {
    /// Build from the shared email configuration
    pub fn from_email_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_KEY not set".to_string()))?;

        if config.from_address.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_FROM_ADDRESS must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            from_address: config.from_address.clone(),
            subject: config.subject.clone(),
            base_url: RESEND_API_BASE.to_string(),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: config.request_timeout_secs,
        })
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::from_email_config(&EmailConfig::from_env())
    }
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Resend email service implementation
pub struct ResendEmailService {
    client: Client,
    config: ResendConfig,
}

impl ResendEmailService {
    /// Create a new Resend email service
    pub fn new(config: ResendConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %config.from_address,
            "Resend email service initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(ResendConfig::from_env()?)
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    async fn send_with_retry(&self, body: &SendEmailBody<'_>) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let max_retries = self.config.max_retries.max(1);

        loop {
            attempts += 1;
            debug!(attempt = attempts, max_retries, "Sending email via Resend");

            let result = self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.config.api_key)
                .json(body)
                .send()
                .await;

            let retry_reason = match result {
                Ok(response) if response.status().is_success() => {
                    let parsed: SendEmailResponse = response.json().await?;
                    return Ok(parsed.id);
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    if !is_retryable(status) || attempts >= max_retries {
                        error!(status = status.as_u16(), attempts, "Resend rejected email");
                        return Err(InfrastructureError::Email(format!(
                            "Resend send failed (status={}): {}",
                            status.as_u16(),
                            text
                        )));
                    }
                    format!("status {}", status.as_u16())
                }
                Err(e) => {
                    if attempts >= max_retries {
                        error!(error = %e, attempts, "Failed to reach Resend");
                        return Err(InfrastructureError::Http(e));
                    }
                    e.to_string()
                }
            };

            warn!(
                attempt = attempts,
                reason = %retry_reason,
                "Retrying Resend request after {:?}",
                delay
            );
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<String, InfrastructureError> {
        let body = SendEmailBody {
            from: &self.config.from_address,
            to: vec![to],
            subject,
            html,
        };

        let id = self.send_with_retry(&body).await?;
        info!(
            recipient = %mask_email(to),
            message_id = %id,
            "Email sent via Resend"
        );
        Ok(id)
    }

    fn verification_subject(&self) -> &str {
        &self.config.subject
    }

    fn provider_name(&self) -> &str {
        "Resend"
    }
}
