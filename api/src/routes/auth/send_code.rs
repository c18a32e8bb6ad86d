use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use vc_core::services::verification::{CodeStore, NotifierTrait};
use vc_shared::types::ApiResponse;
use vc_shared::utils::email::mask_email;

use super::AppState;
use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/send-code
///
/// Issues a fresh code for the email address and mails it. Any code
/// previously issued for the same address stops working.
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "Verification code sent successfully",
///         "expires_at": "2026-03-01T09:10:00Z",
///         "expires_in": 600
///     },
///     "error": null,
///     "timestamp": "2026-03-01T09:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 `validation_error` for a malformed email address
/// - 503 `email_service_unavailable` when delivery fails
pub async fn send_code<N, C>(
    state: web::Data<AppState<N, C>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    N: NotifierTrait + 'static,
    C: CodeStore + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = request.validate() {
        tracing::warn!(
            request_id = %request_id,
            email = %mask_email(&request.email),
            "Validation failed for send_code request"
        );
        return handle_validation_errors(&errors);
    }

    match state.verification_service.issue(&request.email).await {
        Ok(outcome) => {
            tracing::info!(
                request_id = %request_id,
                email = %outcome.identifier.masked(),
                message_id = %outcome.message_id,
                "Verification code sent"
            );

            let response = ApiResponse::success(SendCodeResponse {
                message: "Verification code sent successfully".to_string(),
                expires_at: outcome.expires_at,
                expires_in: outcome.expires_in_seconds(Utc::now()),
            })
            .with_request_id(request_id);

            HttpResponse::Ok().json(response)
        }
        Err(error) => {
            tracing::error!(
                request_id = %request_id,
                email = %mask_email(&request.email),
                error = %error,
                "Failed to send verification code"
            );
            handle_domain_error(&error)
        }
    }
}
