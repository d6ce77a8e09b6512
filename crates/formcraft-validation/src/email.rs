//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// Something without whitespace or '@', an '@', then a dotted domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates basic email format
///
/// Deliberately loose: one '@' with a non-empty local part and a domain
/// containing at least one '.' with text on both sides. Whitespace anywhere
/// rejects the address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
