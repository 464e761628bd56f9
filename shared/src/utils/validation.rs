//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static OTP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

/// Common validation functions
pub mod validators {
    use super::{EMAIL_REGEX, OTP_REGEX};

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string has at least `min` characters
    pub fn min_chars(value: &str, min: usize) -> bool {
        value.chars().count() >= min
    }

    /// Check if an email address has the `local@domain.tld` shape
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    /// Check if a one-time passcode is exactly six digits
    pub fn is_valid_otp(otp: &str) -> bool {
        OTP_REGEX.is_match(otp)
    }

    /// Check if a URL is an http(s) URL
    pub fn is_valid_url(url: &str) -> bool {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
    }
}

/// Mask an email address for logs (e.g., a***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn test_otp_validation() {
        assert!(is_valid_otp("123456"));
        assert!(!is_valid_otp("12a45"));
        assert!(!is_valid_otp("12345"));
        assert!(!is_valid_otp("1234567"));
    }

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("https://acme.example"));
        assert!(is_valid_url("http://acme.example/about"));
        assert!(!is_valid_url("ftp://acme.example"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_min_chars_counts_characters() {
        assert!(min_chars("Zoë", 3));
        assert!(!min_chars("A", 2));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ann@x.com"), "a***@x.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
