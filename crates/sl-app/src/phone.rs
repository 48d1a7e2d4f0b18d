//! Phone number formatting

/// Format a phone number for storage.
///
/// Strips all non-digit characters; exactly ten remaining digits render as
/// `(DDD)DDD-DDDD`. Any other digit count returns the input unchanged, a
/// deliberate passthrough for international or partial numbers.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("({}){}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digits() {
        assert_eq!(format_phone("1234567890"), "(123)456-7890");
    }

    #[test]
    fn test_ten_digits_with_separators() {
        assert_eq!(format_phone("123-456-7890"), "(123)456-7890");
        assert_eq!(format_phone("(123) 456 7890"), "(123)456-7890");
    }

    #[test]
    fn test_passthrough_short() {
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn test_passthrough_international() {
        assert_eq!(format_phone("+81 3 1234 5678"), "+81 3 1234 5678");
    }

    #[test]
    fn test_passthrough_empty() {
        assert_eq!(format_phone(""), "");
    }
}
