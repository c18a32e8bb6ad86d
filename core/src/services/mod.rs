//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    Clock, CodeStore, IssueOutcome, ManualClock, NotifierTrait, SystemClock, VerificationPolicy,
    VerificationService,
};
