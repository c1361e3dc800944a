use std::cmp::Ordering;

use crate::entities::AccountCode;

/// Orders account codes: numeric codes compare as numbers and come before
/// non-numeric codes, which compare lexically. Kept total so that sorting
/// mixed datasets is well defined.
pub(crate) fn compare_codes(a: &AccountCode, b: &AccountCode) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.0.cmp(&b.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    }
}

/// Case-insensitive substring test. `needle` must already be lowercase.
pub(crate) fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> AccountCode {
        AccountCode(s.to_string())
    }

    #[test]
    fn test_numeric_codes_compare_as_numbers() {
        assert_eq!(compare_codes(&code("9"), &code("10")), Ordering::Less);
        assert_eq!(compare_codes(&code("1000"), &code("200")), Ordering::Greater);
    }

    #[test]
    fn test_textual_codes_compare_lexically() {
        assert_eq!(compare_codes(&code("AR-10"), &code("AR-9")), Ordering::Less);
        assert_eq!(compare_codes(&code("10"), &code("1A")), Ordering::Less);
        assert_eq!(compare_codes(&code("1A"), &code("9")), Ordering::Greater);
    }

    #[test]
    fn test_contains_lowercase() {
        assert!(contains_lowercase("Cash in Hand", "cash"));
        assert!(contains_lowercase("PETTY CASH", "cash"));
        assert!(!contains_lowercase("Bank", "cash"));
    }
}
