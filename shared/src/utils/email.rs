//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape check; delivery is the provider's concern
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Normalize an email address for use as a lookup key
///
/// Trims surrounding whitespace and lowercases the whole address so that
/// `" Alice@Example.com "` and `"alice@example.com"` address the same entry.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a plausible `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for logging (e.g., a***e@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = match chars.len() {
                0 => String::from("***"),
                1 | 2 => format!("{}***", chars[0]),
                n => format!("{}***{}", chars[0], chars[n - 1]),
            };
            format!("{}@{}", masked_local, domain)
        }
        None => "****".to_string(),
    }
}
