//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check; the auth backend does the authoritative validation
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address (trim, lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Number of characters in user input, as the user sees them
pub fn char_count(value: &str) -> usize {
    value.chars().count()
}
