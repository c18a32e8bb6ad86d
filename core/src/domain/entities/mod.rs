//! Domain entities representing core business objects.

pub mod pending_verification;


// Re-export commonly used types
pub use pending_verification::{
    AttemptOutcome, PendingVerification, CODE_LENGTH, CODE_MAX, CODE_MIN,
    DEFAULT_EXPIRATION_MINUTES,
};
