//! Shared utilities and common types for the VerifyCode server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelope types
//! - Utility functions (email normalization and masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, EmailConfig, EmailProvider, Environment, LogFormat, LoggingConfig, ServerConfig,
    VerificationConfig,
};
pub use types::{ApiResponse, ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
pub use utils::email;
