//! Input formatting for card fields

/// Group card digits in blocks of four: `"4111111111111111"` → `"4111 1111 1111 1111"`
pub fn format_card_number(value: &str) -> String {
    let cleaned: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits only, `MM/YY` once two digits are typed
pub fn format_card_expiry(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 2 {
        let rest: String = digits.chars().skip(2).take(2).collect();
        format!("{}/{}", &digits[..2], rest)
    } else {
        digits
    }
}

/// Digits only, at most four
pub fn format_card_cvv(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).take(4).collect()
}

/// Last four digits behind a mask: `**** **** **** 1111`
pub fn mask_card_number(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    let last: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("**** **** **** {}", last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111 11"), "4111 11");
        assert_eq!(format_card_number(""), "");
        // Idempotent on already formatted input
        assert_eq!(format_card_number("4111 1111 1"), "4111 1111 1");
    }

    #[test]
    fn test_format_card_expiry() {
        assert_eq!(format_card_expiry("1225"), "12/25");
        assert_eq!(format_card_expiry("1"), "1");
        assert_eq!(format_card_expiry("12"), "12/");
        assert_eq!(format_card_expiry("12/2599"), "12/25");
    }

    #[test]
    fn test_format_card_cvv() {
        assert_eq!(format_card_cvv("12a345"), "1234");
        assert_eq!(format_card_cvv("abc"), "");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask_card_number("4111 1111 1111 1234"), "**** **** **** 1234");
    }
}
