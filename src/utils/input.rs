//! 表單輸入的寬鬆解析：無法解析的輸入一律視為 0，不回傳錯誤。

use regex::Regex;
use std::sync::OnceLock;

const CURRENCY_PREFIXES: [char; 5] = ['$', '€', '£', '₹', '¥'];

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d*(\.\d*)?$").expect("static regex is valid"))
}

fn strip_decorations(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let trimmed = trimmed.trim_start_matches(CURRENCY_PREFIXES);
    trimmed
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect()
}

/// 解析使用者輸入的數字；空字串、非數字、NaN/∞ 皆回傳 0.0
pub fn parse_input(raw: &str) -> f64 {
    let cleaned = strip_decorations(raw);
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a count such as years or months; fractions truncate, negatives clamp to 0.
pub fn parse_count(raw: &str) -> u32 {
    let value = parse_input(raw);
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

/// 輸入過程中的即時檢查（對應表單上的 regex 遮罩）
pub fn is_numeric_input(raw: &str) -> bool {
    let cleaned = strip_decorations(raw);
    numeric_pattern().is_match(&cleaned)
}

/// 輸入無法辨識、最後被當成 0 的情況（`1e3` 之類仍可解析者不算）
pub fn falls_back_to_zero(raw: &str) -> bool {
    !is_numeric_input(raw) && parse_input(raw) == 0.0
}

/// Like [`parse_input`], but logs a warning naming the field when the raw text was replaced by 0.
pub fn coerce(field: &str, raw: &str) -> f64 {
    if falls_back_to_zero(raw) {
        tracing::warn!("⚠️ '{}' is not a number for {}; treating it as 0", raw, field);
    }
    parse_input(raw)
}

pub fn coerce_count(field: &str, raw: &str) -> u32 {
    if falls_back_to_zero(raw) {
        tracing::warn!("⚠️ '{}' is not a number for {}; treating it as 0", raw, field);
    }
    parse_count(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_input("240000"), 240000.0);
        assert_eq!(parse_input("4.5"), 4.5);
        assert_eq!(parse_input("-12.25"), -12.25);
    }

    #[test]
    fn test_parse_masked_numbers() {
        assert_eq!(parse_input("$240,000"), 240000.0);
        assert_eq!(parse_input(" 1 000 000 "), 1_000_000.0);
        assert_eq!(parse_input("4.5%"), 4.5);
        assert_eq!(parse_input("₹1,00,000"), 100000.0);
    }

    #[test]
    fn test_malformed_input_is_zero() {
        assert_eq!(parse_input(""), 0.0);
        assert_eq!(parse_input("abc"), 0.0);
        assert_eq!(parse_input("1.2.3"), 0.0);
        assert_eq!(parse_input("NaN"), 0.0);
        assert_eq!(parse_input("inf"), 0.0);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("30"), 30);
        assert_eq!(parse_count("2.9"), 2);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("x"), 0);
    }

    #[test]
    fn test_coerce_never_fails() {
        assert_eq!(coerce("rate", "4.5"), 4.5);
        assert_eq!(coerce("rate", "four"), 0.0);
        assert_eq!(coerce_count("years", "thirty"), 0);
    }

    #[test]
    fn test_is_numeric_input() {
        assert!(is_numeric_input("12.5"));
        assert!(is_numeric_input("1,234"));
        assert!(is_numeric_input(""));
        assert!(is_numeric_input("12."));
        assert!(!is_numeric_input("12a"));
        assert!(!is_numeric_input("1.2.3"));
    }

    #[test]
    fn test_zero_fallback_detection() {
        assert!(falls_back_to_zero("abc"));
        assert!(falls_back_to_zero("12abc"));
        assert!(!falls_back_to_zero("1e3"));
        assert_eq!(coerce("amount", "1e3"), 1000.0);
        assert!(!falls_back_to_zero("0"));
        assert!(!falls_back_to_zero("$1,200"));
    }
}
