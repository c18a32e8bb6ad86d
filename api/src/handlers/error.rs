//! Mapping of domain and request errors to HTTP responses

use std::collections::HashMap;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use vc_core::errors::{DomainError, VerificationError};
use vc_shared::types::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message.as_str()))
        }
        DomainError::Verification(verification_error) => handle_verification_error(verification_error),
    }
}

fn handle_verification_error(error: &VerificationError) -> HttpResponse {
    match error {
        VerificationError::NotFound => HttpResponse::BadRequest().json(ErrorResponse::new(
            "code_not_found",
            "No verification code found for this email. Please request a new code.",
        )),
        VerificationError::Expired => HttpResponse::BadRequest().json(ErrorResponse::new(
            "code_expired",
            "Verification code has expired. Please request a new code.",
        )),
        VerificationError::Mismatch => HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_code",
            "Invalid verification code",
        )),
        VerificationError::TooManyAttempts => HttpResponse::TooManyRequests().json(ErrorResponse::new(
            "too_many_attempts",
            "Maximum verification attempts exceeded. Please request a new code.",
        )),
        VerificationError::NotifierFailure { .. } => {
            // Provider details stay in the logs
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                "email_service_unavailable",
                "Failed to send verification email. Please try again later.",
            ))
        }
    }
}

/// Convert `validator` failures into a 400 with per-field messages
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let details: HashMap<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), serde_json::json!(messages))
        })
        .collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new("validation_error", "Invalid request data").with_details(details),
    )
}

/// Error handler for JSON extraction failures
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected malformed JSON body");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        "validation_error",
        "Request body must be valid JSON",
    ));
    InternalError::from_response(err, response).into()
}
