//! File upload validation functions

/// Bytes in one mebibyte, the unit used in size-limit messages
pub const BYTES_PER_MEBIBYTE: u64 = 1024 * 1024;

/// True when `mime` is one of the `allowed` MIME types (exact match)
pub fn is_allowed_type(mime: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| a == mime)
}

/// True when `size` is strictly larger than `max` bytes
pub fn exceeds_size(size: u64, max: u64) -> bool {
    size > max
}

/// Renders a byte count in mebibytes for display
///
/// Uses the shortest decimal that round-trips, so whole numbers print
/// without a fraction: 1048576 -> "1", 1572864 -> "1.5".
pub fn format_mebibytes(bytes: u64) -> String {
    let mib = bytes as f64 / BYTES_PER_MEBIBYTE as f64;
    format!("{}", mib)
}
