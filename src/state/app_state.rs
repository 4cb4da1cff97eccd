//! Application state definitions

use super::forms::{FormValues, ProfileForm, ValidationTiming};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Progress of the simulated submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    /// Submit control is disabled until the handler completes
    Submitting { started: Instant, delay: Duration },
}

impl SubmitStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitStatus::Submitting { .. })
    }

    /// Eased progress from 0.0 to 1.0 while submitting
    pub fn progress(&self) -> f64 {
        match self {
            SubmitStatus::Idle => 0.0,
            SubmitStatus::Submitting { started, delay } => {
                if delay.is_zero() {
                    return 1.0;
                }
                let linear = (started.elapsed().as_secs_f32() / delay.as_secs_f32()).min(1.0);
                f64::from(simple_easing::cubic_out(linear))
            }
        }
    }
}

/// Console entries kept before the oldest is dropped
pub const CONSOLE_CAPACITY: usize = 100;

/// One record written to the diagnostic console
#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    pub at: DateTime<Local>,
    pub values: FormValues,
}

impl ConsoleEntry {
    pub fn new(values: FormValues) -> Self {
        Self {
            at: Local::now(),
            values,
        }
    }

    /// Compact JSON rendering of the record
    pub fn json(&self) -> String {
        serde_json::to_string(&self.values).unwrap_or_else(|e| format!("<unserializable: {e}>"))
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub form: ProfileForm,
    pub submit_status: SubmitStatus,
    /// Most recent submitted records, oldest first
    pub console: VecDeque<ConsoleEntry>,
    /// Successful submissions since startup
    pub total_submissions: u32,
    pub mask_password: bool,
    /// Queue of error messages to display
    error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(timing: ValidationTiming, mask_password: bool) -> Self {
        Self {
            form: ProfileForm::new(timing),
            mask_password,
            ..Default::default()
        }
    }

    /// Push an error message to the queue
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// Get the current error message (first in queue)
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Dismiss the current error
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Log an accepted record, dropping the oldest past `CONSOLE_CAPACITY`
    pub fn record_submission(&mut self, values: FormValues) {
        if self.console.len() == CONSOLE_CAPACITY {
            self.console.pop_front();
        }
        self.console.push_back(ConsoleEntry::new(values));
        self.total_submissions += 1;
    }

    pub fn last_submission(&self) -> Option<&ConsoleEntry> {
        self.console.back()
    }
}
