//! Validation rules attached to registered fields
//!
//! Rules are evaluated in a fixed order: `required`, `min_length`, `pattern`,
//! then `validate`. The first failing rule produces the field's error.
//! `min_length` and `pattern` are skipped for empty input; `validate` always
//! runs and receives the coerced value.

use super::coerce::Coerced;
use thiserror::Error;

/// Which rule produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    MinLength,
    Pattern,
    Validate,
}

/// A failed rule, carrying the message shown under the field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: RuleKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Matches raw text for a `pattern` rule
pub type Matcher = fn(&str) -> bool;

/// Custom check on the coerced value; returns a message on failure
pub type Check = fn(&Coerced) -> Option<&'static str>;

/// Rule set for a single field, built like register options
#[derive(Debug, Clone, Default)]
pub struct Rules {
    required: Option<&'static str>,
    min_length: Option<(usize, &'static str)>,
    pattern: Option<(Matcher, &'static str)>,
    validate: Option<Check>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub fn min_length(mut self, len: usize, message: &'static str) -> Self {
        self.min_length = Some((len, message));
        self
    }

    pub fn pattern(mut self, matcher: Matcher, message: &'static str) -> Self {
        self.pattern = Some((matcher, message));
        self
    }

    pub fn validate(mut self, check: Check) -> Self {
        self.validate = Some(check);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Evaluate all rules against `raw` and its coerced form.
    ///
    /// A number or date holding only whitespace coerces to `Coerced::Empty`
    /// and counts as missing.
    pub fn evaluate(&self, raw: &str, coerced: &Coerced) -> Result<(), FieldError> {
        let empty = raw.is_empty() || matches!(coerced, Coerced::Empty);

        if let Some(message) = self.required {
            if empty {
                return Err(FieldError::new(RuleKind::Required, message));
            }
        }

        if !empty {
            if let Some((len, message)) = self.min_length {
                if raw.chars().count() < len {
                    return Err(FieldError::new(RuleKind::MinLength, message));
                }
            }

            if let Some((matcher, message)) = self.pattern {
                if !matcher(raw) {
                    return Err(FieldError::new(RuleKind::Pattern, message));
                }
            }
        }

        if let Some(check) = self.validate {
            if let Some(message) = check(coerced) {
                return Err(FieldError::new(RuleKind::Validate, message));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_fails(_: &Coerced) -> Option<&'static str> {
        Some("nope")
    }

    fn starts_with_a(raw: &str) -> bool {
        raw.starts_with('a')
    }

    #[test]
    fn test_empty_rules_accept_anything() {
        let rules = Rules::new();
        assert!(!rules.is_required());
        assert!(rules.evaluate("", &Coerced::Empty).is_ok());
    }

    #[test]
    fn test_blank_coerced_value_fails_required() {
        let rules = Rules::new().required("select a date");
        let err = rules.evaluate("   ", &Coerced::Empty).unwrap_err();
        assert_eq!(err.kind, RuleKind::Required);
        assert_eq!(err.message, "select a date");
        assert!(rules.evaluate("   ", &Coerced::Text("   ".to_string())).is_ok());
    }

    #[test]
    fn test_required_wins_over_other_rules() {
        let rules = Rules::new()
            .required("needed")
            .min_length(3, "short")
            .validate(always_fails);
        let err = rules.evaluate("", &Coerced::Empty).unwrap_err();
        assert_eq!(err.kind, RuleKind::Required);
        assert_eq!(err.to_string(), "needed");
    }

    #[test]
    fn test_min_length_counts_chars() {
        let rules = Rules::new().min_length(4, "short");
        assert!(rules.evaluate("äöü", &Coerced::Empty).is_err());
        assert!(rules.evaluate("äöüß", &Coerced::Empty).is_ok());
    }

    #[test]
    fn test_min_length_and_pattern_skip_empty_input() {
        let rules = Rules::new()
            .min_length(4, "short")
            .pattern(starts_with_a, "bad");
        assert!(rules.evaluate("", &Coerced::Empty).is_ok());
    }

    #[test]
    fn test_pattern_runs_before_validate() {
        let rules = Rules::new()
            .pattern(starts_with_a, "bad")
            .validate(always_fails);
        let err = rules.evaluate("b", &Coerced::Empty).unwrap_err();
        assert_eq!(err.kind, RuleKind::Pattern);
        let err = rules.evaluate("a", &Coerced::Empty).unwrap_err();
        assert_eq!(err.kind, RuleKind::Validate);
    }

    #[test]
    fn test_validate_runs_on_empty_input() {
        let rules = Rules::new().validate(always_fails);
        assert!(rules.evaluate("", &Coerced::Empty).is_err());
    }
}
