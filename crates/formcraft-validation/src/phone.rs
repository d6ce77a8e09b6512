//! Phone number validation

use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Number of digits a phone number must have
pub const PHONE_DIGITS: usize = 10;

/// Validates a phone number: exactly ten decimal digits, nothing else
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}
