use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use vc_core::domain::entities::CODE_LENGTH;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Address the code is mailed to
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(max = 254))]
    pub email: String,

    /// Submitted code, as typed by the user
    #[validate(length(max = 64))]
    pub code: String,
}

impl VerifyCodeRequest {
    /// Digits of the submitted code, truncated to the code length
    ///
    /// Mirrors the input box, which only accepts digits and stops at six.
    pub fn sanitized_code(&self) -> String {
        self.code
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CODE_LENGTH)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64, // seconds the code stays valid
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
    pub message: String,
}
