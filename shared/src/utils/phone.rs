//! Phone number validation and masking utilities
//!
//! The service accepts mainland Chinese mobile numbers in local format:
//! 11 digits, starting with 13-19. Validation happens before any store
//! lookup, so an invalid number never creates a user record.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regular expression for Chinese mobile numbers in local format
static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    // 11 digits starting with 13-19
    Regex::new(r"^1[3-9]\d{9}$").unwrap()
});

/// Validates a mobile phone number
///
/// # Arguments
///
/// * `phone` - Phone number to validate
///
/// # Returns
///
/// * `bool` - True if the number is an 11-digit mobile number starting
///   with 13-19
pub fn is_valid_phone(phone: &str) -> bool {
    MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for logging (show only last 4 characters)
///
/// Callers pass arbitrary, unvalidated input here, so the split must land
/// on a char boundary rather than a byte offset.
///
/// # Arguments
///
/// * `phone` - Phone number to mask
///
/// # Returns
///
/// * `String` - Masked phone number
pub fn mask_phone(phone: &str) -> String {
    if phone.chars().count() <= 4 {
        return "*".repeat(phone.chars().count());
    }
    let tail_start = phone
        .char_indices()
        .rev()
        .nth(3)
        .map(|(index, _)| index)
        .unwrap_or(0);
    format!("***{}", &phone[tail_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("13800138000"));
        assert!(is_valid_phone("15912345678"));
        assert!(is_valid_phone("18612345678"));
        assert!(is_valid_phone("19912345678"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!is_valid_phone("12812345678")); // invalid second digit
        assert!(!is_valid_phone("1380013800")); // too short
        assert!(!is_valid_phone("138001380000")); // too long
        assert!(!is_valid_phone("23800138000")); // wrong leading digit
        assert!(!is_valid_phone("1380013800a")); // non-digit
        assert!(!is_valid_phone("+8613800138000")); // country code not accepted
        assert!(!is_valid_phone("")); // empty
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("13800138000"), "***8000");
        assert_eq!(mask_phone("1234"), "****");
        assert_eq!(mask_phone("123"), "***");
    }

    #[test]
    fn test_mask_phone_multibyte_input() {
        // Rejected numbers are masked before validation, so masking must
        // not panic on non-ASCII input
        assert_eq!(mask_phone("12中文99"), "***中文99");
        assert_eq!(mask_phone("电话号码"), "****");
        assert_eq!(mask_phone("1380013中文0"), "***3中文0");
    }
}
