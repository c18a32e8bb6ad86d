use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use vc_core::services::verification::{CodeStore, NotifierTrait};
use vc_shared::types::ApiResponse;
use vc_shared::utils::email::mask_email;

use super::AppState;
use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/verify-code
///
/// Checks a submitted code. The code is reduced to its digits and cut at six
/// characters before comparison. A matching code is consumed.
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "code": "482913" }
/// ```
///
/// ## Errors
/// - 400 `code_not_found`, `code_expired` or `invalid_code`
/// - 429 `too_many_attempts` once the attempt budget is spent
pub async fn verify_code<N, C>(
    state: web::Data<AppState<N, C>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    N: NotifierTrait + 'static,
    C: CodeStore + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let code = request.sanitized_code();

    match state.verification_service.verify(&request.email, &code).await {
        Ok(()) => {
            tracing::info!(
                request_id = %request_id,
                email = %mask_email(&request.email),
                "Email verified"
            );

            let response = ApiResponse::success(VerifyCodeResponse {
                verified: true,
                message: "Email verified successfully".to_string(),
            })
            .with_request_id(request_id);

            HttpResponse::Ok().json(response)
        }
        Err(error) => {
            tracing::info!(
                request_id = %request_id,
                email = %mask_email(&request.email),
                reason = %error,
                "Verification rejected"
            );
            handle_domain_error(&error)
        }
    }
}
