//! When field rules are evaluated outside of a submit

use serde::{Deserialize, Serialize};

/// Validation strategy before the first submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    OnSubmit,
    OnBlur,
    OnChange,
    /// First blur, then every change
    OnTouched,
    All,
}

/// Validation strategy after a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidateMode {
    OnSubmit,
    OnBlur,
    #[default]
    OnChange,
}

/// A user interaction with a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Change,
    Blur,
}

/// Combined timing configuration for a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationTiming {
    pub mode: ValidationMode,
    pub re_validate_mode: RevalidateMode,
}

impl ValidationTiming {
    pub fn new(mode: ValidationMode, re_validate_mode: RevalidateMode) -> Self {
        Self {
            mode,
            re_validate_mode,
        }
    }

    /// Whether `event` on a field should run its rules
    pub fn should_validate(&self, event: FieldEvent, touched: bool, is_submitted: bool) -> bool {
        if is_submitted {
            return match self.re_validate_mode {
                RevalidateMode::OnSubmit => false,
                RevalidateMode::OnBlur => event == FieldEvent::Blur,
                RevalidateMode::OnChange => event == FieldEvent::Change,
            };
        }

        match self.mode {
            ValidationMode::OnSubmit => false,
            ValidationMode::OnBlur => event == FieldEvent::Blur,
            ValidationMode::OnChange => event == FieldEvent::Change,
            ValidationMode::OnTouched => event == FieldEvent::Blur || touched,
            ValidationMode::All => true,
        }
    }
}
