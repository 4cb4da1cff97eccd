//! Coercion of raw input text into typed values

use chrono::NaiveDate;

/// Date format accepted by date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a field's raw text is interpreted before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueAs {
    #[default]
    Text,
    Number,
    Date,
}

/// A raw value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// Nothing was entered
    Empty,
    Text(String),
    /// Unparseable input coerces to NaN, never to an error
    Number(f64),
    /// `None` when the text is not a calendar date
    Date(Option<NaiveDate>),
}

impl Coerced {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Coerced::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Coerced::Date(d) => *d,
            _ => None,
        }
    }
}

/// Coerce raw text according to `value_as`
pub fn coerce(raw: &str, value_as: ValueAs) -> Coerced {
    match value_as {
        ValueAs::Text => Coerced::Text(raw.to_string()),
        ValueAs::Number if raw.trim().is_empty() => Coerced::Empty,
        ValueAs::Number => Coerced::Number(parse_number(raw)),
        ValueAs::Date if raw.trim().is_empty() => Coerced::Empty,
        ValueAs::Date => Coerced::Date(NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()),
    }
}

/// Parse a decimal number, yielding NaN for anything that is not one.
///
/// Rust's float parser also accepts spellings like `inf` and `NaN`; those are
/// rejected so that only plain decimal and exponent notation counts.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let plain = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !plain {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// True when `n` is a valid number whose rendering is exactly `len` digits
pub fn renders_as_digits(n: f64, len: usize) -> bool {
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
        return false;
    }
    let rendered = n.to_string();
    rendered.len() == len && rendered.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_coercion_empty() {
        assert_eq!(coerce("", ValueAs::Number), Coerced::Empty);
        assert_eq!(coerce("   ", ValueAs::Number), Coerced::Empty);
    }

    #[test]
    fn test_number_coercion_valid() {
        assert_eq!(coerce(" 42 ", ValueAs::Number), Coerced::Number(42.0));
        assert_eq!(coerce("1e3", ValueAs::Number).as_number(), Some(1000.0));
    }

    #[test]
    fn test_number_coercion_invalid_is_nan() {
        assert!(coerce("12ab", ValueAs::Number).as_number().is_none());
        assert!(coerce("inf", ValueAs::Number).as_number().is_none());
        assert!(coerce("NaN", ValueAs::Number).as_number().is_none());
    }

    #[test]
    fn test_date_coercion() {
        let d = coerce("2024-02-29", ValueAs::Date).as_date();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(coerce("2023-02-29", ValueAs::Date), Coerced::Date(None));
        assert_eq!(coerce("", ValueAs::Date), Coerced::Empty);
    }

    #[test]
    fn test_text_coercion_keeps_raw() {
        assert_eq!(coerce(" a ", ValueAs::Text), Coerced::Text(" a ".to_string()));
    }

    #[test]
    fn test_renders_as_digits() {
        assert!(renders_as_digits(9876543210.0, 10));
        assert!(renders_as_digits(123456.0, 6));
        assert!(!renders_as_digits(123.0, 10));
        assert!(!renders_as_digits(12345.0, 6));
        assert!(!renders_as_digits(f64::NAN, 6));
        assert!(!renders_as_digits(-12345.0, 6));
        assert!(!renders_as_digits(1234.5, 6));
    }

    #[test]
    fn test_leading_zero_is_dropped_by_coercion() {
        let n = parse_number("0123456789");
        assert!(!renders_as_digits(n, 10));
    }
}
