use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

use vc_api::{create_app, telemetry, AppState};
use vc_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load the environment-specific file first, then the generic .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        "Starting VerifyCode API Server"
    );

    let infra = vc_infra::initialize(&config).await?;
    let app_state = web::Data::new(AppState::new(Arc::new(infra.verification_service())));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone()).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(sweeper) = infra.sweeper {
        sweeper.stop();
    }
    info!("Server stopped");

    Ok(())
}
