//! Password validation functions

/// Minimum password length, counted in characters
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Validates password strength
///
/// A password passes when it has at least eight characters and contains at
/// least one ASCII letter and one ASCII digit, in any order. Other
/// characters (punctuation, spaces, non-ASCII) are allowed and count toward
/// the length.
pub fn is_valid_password(password: &str) -> bool {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return false;
    }

    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_letter && has_digit
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc12345")]
    #[case("12345abc")]
    #[case("a1b2c3d4")]
    #[case("Password123!")]
    #[case("pass word 1")]
    fn test_accepted_passwords(#[case] password: &str) {
        assert!(is_valid_password(password));
    }

    #[rstest]
    #[case("abcdefgh")]
    #[case("12345678")]
    #[case("abc1234")]
    #[case("")]
    #[case("!!!!!!!!")]
    fn test_rejected_passwords(#[case] password: &str) {
        assert!(!is_valid_password(password));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 chars, more than 8 bytes
        assert!(!is_valid_password("é1é1é1é"));
        assert!(is_valid_password("é1é1é1éa"));
    }
}
