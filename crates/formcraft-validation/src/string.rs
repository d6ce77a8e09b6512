//! String length validation functions

/// Length of a value once surrounding whitespace is removed, in characters
pub fn trimmed_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// True when the trimmed value has fewer than `min` characters
pub fn is_shorter_than(s: &str, min: usize) -> bool {
    trimmed_len(s) < min
}

/// True when the trimmed value has more than `max` characters
pub fn is_longer_than(s: &str, max: usize) -> bool {
    trimmed_len(s) > max
}
