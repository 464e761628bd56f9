//! Mobile number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Optional leading +, 7 to 15 digits, no leading zero
static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{6,14}$").unwrap());

/// Normalize a mobile number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a mobile number is acceptable for OTP delivery
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a mobile number for logs (e.g., +91****7890)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+91 12345-67890"), "+911234567890");
        assert_eq!(normalize_phone_number("(555) 010-2000"), "5550102000");
    }

    #[test]
    fn test_is_valid_mobile() {
        assert!(is_valid_mobile("+911234567890"));
        assert!(is_valid_mobile("14155552671"));
        assert!(!is_valid_mobile("+0123456789"));
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile("+1234567890123456"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+911234567890"), "+91****7890");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
