//! Email verification route handlers
//!
//! - `POST /api/v1/auth/send-code` issues and mails a code
//! - `POST /api/v1/auth/verify-code` checks a submitted code

pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use vc_core::services::verification::{CodeStore, NotifierTrait, VerificationService};

/// Application state that holds shared services
pub struct AppState<N, C>
where
    N: NotifierTrait,
    C: CodeStore,
{
    pub verification_service: Arc<VerificationService<N, C>>,
}

impl<N: NotifierTrait, C: CodeStore> AppState<N, C> {
    pub fn new(verification_service: Arc<VerificationService<N, C>>) -> Self {
        Self {
            verification_service,
        }
    }
}
