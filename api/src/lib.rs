//! HTTP API for the VerifyCode service
//!
//! Exposes the issue and verify operations over JSON endpoints, built on
//! the core verification service and the infrastructure implementations.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::auth::AppState;
