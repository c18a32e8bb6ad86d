//! # VerifyCode Core
//!
//! Core business logic and domain layer for the VerifyCode backend.
//! This crate contains the pending verification entity, the identifier value
//! object, the verification service with its store and notifier seams, and
//! the error taxonomy shared by every layer above it.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
