use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use chrono::Utc;

use vc_core::services::verification::{CodeStore, NotifierTrait};
use vc_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use super::auth::AppState;

/// Health check endpoint handler
pub async fn health_check<N, C>(state: web::Data<AppState<N, C>>) -> HttpResponse
where
    N: NotifierTrait + 'static,
    C: CodeStore + 'static,
{
    let pending = state.verification_service.pending_count();

    let mut services = HashMap::new();
    services.insert(
        "code_store".to_string(),
        ServiceHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{} pending codes", pending)),
        },
    );

    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Healthy,
        services,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
