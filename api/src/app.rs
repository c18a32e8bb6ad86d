//! Application factory
//!
//! Builds the Actix-web application: JSON extraction settings, the auth
//! routes, health check and the JSON 404 fallback.

use actix_web::{web, App, HttpResponse};

use vc_core::services::verification::{CodeStore, NotifierTrait};
use vc_shared::types::ErrorResponse;

use crate::handlers::error::json_error_handler;
use crate::routes::auth::{send_code::send_code, verify_code::verify_code, AppState};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<N, C>(
    app_state: web::Data<AppState<N, C>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    N: NotifierTrait + 'static,
    C: CodeStore + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().limit(4096).error_handler(json_error_handler))
        // Health check endpoint
        .route("/health", web::get().to(health_check::<N, C>))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/send-code", web::post().to(send_code::<N, C>))
                    .route("/verify-code", web::post().to(verify_code::<N, C>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
