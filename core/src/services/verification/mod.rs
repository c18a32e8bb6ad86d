//! Verification service module for email-based one-time passcodes
//!
//! This module provides the issue/verify workflow:
//! - Code generation and storage through the [`CodeStore`] seam
//! - Delivery through the [`NotifierTrait`] seam
//! - Single-use consumption, expiry and attempt budgets
//! - An injectable [`Clock`] for deterministic expiry

mod clock;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VerificationPolicy;
pub use service::VerificationService;
pub use traits::{CodeStore, NotifierTrait};
pub use types::IssueOutcome;
