//! Input validation helpers
//!
//! Text length limits and character-class predicates shared by the checkout
//! and back-office validators. Lengths count characters, not bytes.

// ── Text length limits ──────────────────────────────────────────────

/// Person names (full name, user name)
pub const MAX_NAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 200;

/// City names
pub const MAX_CITY_LEN: usize = 100;

/// Catalog names (category, order status)
pub const MAX_CATALOG_NAME_LEN: usize = 50;

/// Long descriptions (product, order status)
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Predicates ──────────────────────────────────────────────────────

#[inline]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Letters, accented letters and `ñ` included
#[inline]
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

pub fn all_chars(value: &str, pred: impl Fn(char) -> bool) -> bool {
    value.chars().all(pred)
}

pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

pub fn has_letter(value: &str) -> bool {
    value.chars().any(is_letter)
}

/// `local@domain.tld`, tld of two or more letters
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

/// Markup that must never reach the catalog
pub fn contains_script(value: &str) -> bool {
    let lower = value.to_lowercase();
    ["<script", "<iframe", "javascript:", "onerror="]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// Luhn checksum over ASCII digits
pub fn luhn_valid(digits: &str) -> bool {
    if !is_digits(digits) {
        return false;
    }
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// `#RRGGBB` → (r, g, b)
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Perceived brightness (YIQ), 0..=255
pub fn brightness(r: u8, g: u8, b: u8) -> f64 {
    (f64::from(r) * 299.0 + f64::from(g) * 587.0 + f64::from(b) * 114.0) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("ana.perez@correo.com"));
        assert!(is_email("a_b-c@mail.co.pe"));
        assert!(!is_email("ana@correo"));
        assert!(!is_email("ana@correo.c"));
        assert!(!is_email("@correo.com"));
        assert!(!is_email("ana correo@x.com"));
        assert!(!is_email("ana@@x.com"));
    }

    #[test]
    fn test_luhn() {
        assert!(luhn_valid("4111111111111111"));
        assert!(luhn_valid("5555555555554444"));
        assert!(!luhn_valid("4111111111111112"));
        assert!(!luhn_valid(""));
    }

    #[test]
    fn test_hex_color_and_brightness() {
        assert_eq!(parse_hex_color("#10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_hex_color("10b981"), None);
        assert_eq!(parse_hex_color("#10b98"), None);
        assert!(brightness(255, 255, 255) > 220.0);
        assert!(brightness(0x3b, 0x82, 0xf6) < 220.0);
    }

    #[test]
    fn test_contains_script() {
        assert!(contains_script("hola <SCRIPT>alert(1)</script>"));
        assert!(contains_script("JavaScript:void(0)"));
        assert!(!contains_script("Leche entera 1L"));
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("Ñandú"), 5);
    }
}
