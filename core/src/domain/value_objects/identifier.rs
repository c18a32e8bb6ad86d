//! Identifier value object used as the verification key.

use std::fmt;

use vc_shared::utils::email::{mask_email, normalize_email};

use crate::errors::{DomainError, DomainResult};

/// Normalized identifier (an email address) keying a pending verification
///
/// Construction trims and lowercases the raw input so that differently
/// cased spellings of one address share a single entry. Format validation
/// of the address is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Normalize and wrap a raw identifier
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the input is empty after trimming.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = normalize_email(raw);
        if normalized.is_empty() {
            return Err(DomainError::Validation {
                message: "Identifier must not be empty".to_string(),
            });
        }
        Ok(Self(normalized))
    }

    /// The normalized identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form safe for logs
    pub fn masked(&self) -> String {
        mask_email(&self.0)
    }

    /// Consume into the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
