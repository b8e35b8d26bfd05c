pub mod avatar;
pub mod launch;
pub mod preferences;
pub mod scene;
pub mod session;

pub const APP_NAME: &str = "ProceduralHouse";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a model fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(12345), "12345");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn format_fingerprint_is_16_hex_digits() {
        assert_eq!(format_fingerprint(0), "0x0000000000000000");
        assert_eq!(format_fingerprint(255), "0x00000000000000ff");
        assert_eq!(format_fingerprint(0xDEADBEEF), "0x00000000deadbeef");
    }
}
