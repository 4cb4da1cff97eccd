//! Registered form fields

use super::coerce::{coerce, Coerced, ValueAs};
use super::rules::{FieldError, Rules};

/// Input control kind for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Masked when rendered
    Secret,
    Number,
    Date,
    /// Fixed set of options, cycled instead of typed
    Choice(&'static [&'static str]),
}

impl FieldKind {
    fn value_as(&self) -> ValueAs {
        match self {
            FieldKind::Number => ValueAs::Number,
            FieldKind::Date => ValueAs::Date,
            FieldKind::Text | FieldKind::Secret | FieldKind::Choice(_) => ValueAs::Text,
        }
    }
}

/// A single registered input: its path, raw value, rules and error state
#[derive(Debug, Clone)]
pub struct FormField {
    /// Dotted path into the values record, e.g. `address.pincode`
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
    pub rules: Rules,
    pub error: Option<FieldError>,
    /// Focus has left this field at least once
    pub touched: bool,
    value: String,
    default_value: String,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            kind: FieldKind::Text,
            rules: Rules::new(),
            error: None,
            touched: false,
            value: String::new(),
            default_value: String::new(),
        }
    }

    /// Create a masked text field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(name, label)
        }
    }

    /// Create a field whose value is coerced to a number
    pub fn number(name: &str, label: &str) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(name, label)
        }
    }

    /// Create a field whose value is coerced to a date
    pub fn date(name: &str, label: &str) -> Self {
        Self {
            kind: FieldKind::Date,
            placeholder: "YYYY-MM-DD".to_string(),
            ..Self::text(name, label)
        }
    }

    /// Create a choice field; the first option is the default
    pub fn choice(name: &str, label: &str, options: &'static [&'static str]) -> Self {
        let first = options.first().copied().unwrap_or_default().to_string();
        Self {
            kind: FieldKind::Choice(options),
            value: first.clone(),
            default_value: first,
            ..Self::text(name, label)
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Set the value the field starts with and resets to
    pub fn with_default(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.default_value = value.to_string();
        self
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Raw text as typed
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True when the raw value differs from its default
    pub fn is_dirty(&self) -> bool {
        self.value != self.default_value
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }

    /// Replace the raw value. Choice fields only accept one of their options.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if let FieldKind::Choice(options) = self.kind {
            if !options.contains(&value.as_str()) {
                return;
            }
        }
        self.value = value;
    }

    /// Push a character to the field value. Returns false when ignored.
    pub fn push_char(&mut self, c: char) -> bool {
        match self.kind {
            FieldKind::Choice(_) => false,
            _ => {
                self.value.push(c);
                true
            }
        }
    }

    /// Remove the last character. Returns false when nothing changed.
    pub fn pop_char(&mut self) -> bool {
        match self.kind {
            FieldKind::Choice(_) => false,
            _ => self.value.pop().is_some(),
        }
    }

    /// Move to the next (or previous) option of a choice field
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        let FieldKind::Choice(options) = self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let current = options
            .iter()
            .position(|o| *o == self.value)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else if current == 0 {
            options.len() - 1
        } else {
            current - 1
        };
        self.set_value(options[next]);
        true
    }

    /// The raw value coerced by this field's kind
    pub fn coerced(&self) -> Coerced {
        coerce(&self.value, self.kind.value_as())
    }

    /// Run the rules and store the outcome in `error`
    pub fn validate(&mut self) -> Result<(), FieldError> {
        let result = self.rules.evaluate(&self.value, &self.coerced());
        self.error = result.as_ref().err().cloned();
        result
    }

    /// Restore the default value and clear error/touched state
    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
        self.error = None;
        self.touched = false;
    }

    /// Get the display value for rendering
    pub fn display_value(&self, mask_secrets: bool) -> String {
        match self.kind {
            FieldKind::Secret if mask_secrets => "*".repeat(self.value.chars().count()),
            FieldKind::Choice(options) => options
                .iter()
                .map(|o| {
                    if *o == self.value {
                        format!("({o})")
                    } else {
                        o.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
            _ => self.value.clone(),
        }
    }
}
