//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{AppState, FocusTarget, Form, FormValues, SubmitError, SubmitStatus};
use crate::submit::{SimulatedSubmit, SubmitHandler};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Result of a handler run, delivered back to the event loop
struct SubmitOutcome {
    values: FormValues,
    result: Result<()>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded user configuration
    pub config: TuiConfig,
    /// Receives records from submits that passed validation
    handler: Arc<dyn SubmitHandler>,
    submit_delay: Duration,
    outcome_tx: mpsc::UnboundedSender<SubmitOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App that submits through the simulated handler
    pub fn new(config: TuiConfig) -> Self {
        let handler = Arc::new(SimulatedSubmit::new(config.submit_delay()));
        Self::with_handler(config, handler)
    }

    /// Create a new App with a custom submit handler
    pub fn with_handler(config: TuiConfig, handler: Arc<dyn SubmitHandler>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let state = AppState::new(config.timing(), config.mask_password());
        let submit_delay = config.submit_delay();

        tracing::debug!(
            "Form ready (timing: {:?}, submit delay: {:?})",
            state.form.timing,
            submit_delay
        );

        Self {
            state,
            config,
            handler,
            submit_delay,
            outcome_tx,
            outcome_rx,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') if ctrl => self.quit = true,
            KeyCode::Char('s') if ctrl => self.request_submit(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('n') if ctrl => {
                self.state.form.append_hobby();
            }
            KeyCode::Char('d') if ctrl => self.remove_active_hobby(),
            KeyCode::Char('p') if ctrl => self.toggle_password_mask(),
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                if let Err(e) = self.copy_last_submission() {
                    self.push_error(format!("Failed to copy to clipboard: {e}"));
                }
            }
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Left => self.state.form.cycle_choice(false),
            KeyCode::Right => self.state.form.cycle_choice(true),
            KeyCode::Enter => self.activate(),
            KeyCode::Backspace => self.state.form.backspace(),
            KeyCode::Char(c) if !ctrl => self.state.form.input_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Enter on the focused row: press buttons, otherwise move on
    fn activate(&mut self) {
        match self.state.form.active_target() {
            FocusTarget::AddHobby => {
                self.state.form.append_hobby();
            }
            FocusTarget::Submit => self.request_submit(),
            FocusTarget::Reset => self.reset(),
            FocusTarget::Field(_) | FocusTarget::Hobby(_) => self.state.form.next_field(),
        }
    }

    /// Submit from a key press, reporting the outcome in the status bar
    fn request_submit(&mut self) {
        match self.submit() {
            Ok(()) => self.status_message = Some("Submitting...".to_string()),
            Err(SubmitError::AlreadySubmitting) => {
                self.status_message = Some("Submission already in progress".to_string());
            }
            Err(SubmitError::Invalid { count }) => {
                self.status_message = Some(format!("{count} field(s) need attention"));
            }
            Err(e @ SubmitError::Coercion(_)) => self.push_error(e.to_string()),
        }
    }

    /// Validate and, if every rule passes, hand the record to the submit handler.
    ///
    /// At most one submission is in flight; its completion arrives through
    /// `poll_submission`.
    pub fn submit(&mut self) -> std::result::Result<(), SubmitError> {
        if self.state.submit_status.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }

        let values = match self.state.form.handle_submit() {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!("Submit blocked: {e}");
                return Err(e);
            }
        };

        self.state.submit_status = SubmitStatus::Submitting {
            started: Instant::now(),
            delay: self.submit_delay,
        };

        let handler = Arc::clone(&self.handler);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = handler.submit(values.clone()).await;
            // Receiver only disappears when the app is shutting down
            let _ = tx.send(SubmitOutcome { values, result });
        });

        Ok(())
    }

    /// Apply any finished submissions. Called once per frame.
    pub fn poll_submission(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.complete_submission(outcome);
        }
    }

    fn complete_submission(&mut self, outcome: SubmitOutcome) {
        self.state.submit_status = SubmitStatus::Idle;

        match outcome.result {
            Ok(()) => {
                self.state.record_submission(outcome.values);
                self.state.form.reset();
                self.status_message = Some("Submitted! See the console panel".to_string());
            }
            Err(e) => {
                tracing::error!("Submit handler failed: {e:#}");
                self.push_error(format!("Submit failed: {e}"));
            }
        }
    }

    /// Restore all fields to their defaults without submitting
    pub fn reset(&mut self) {
        self.state.form.reset();
        self.status_message = Some("Form reset".to_string());
    }

    fn remove_active_hobby(&mut self) {
        match self.state.form.remove_active_hobby() {
            Ok(hobby) => {
                tracing::debug!("Removed hobby {:?}", hobby.hobby);
            }
            Err(e) => self.status_message = Some(format!("Cannot remove: {e}")),
        }
    }

    fn toggle_password_mask(&mut self) {
        self.state.mask_password = !self.state.mask_password;
        self.config.mask_password = Some(self.state.mask_password);
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {e}");
            self.push_error(format!("Failed to save config: {e}"));
        }
    }

    /// Copy the most recent submitted record to the clipboard as JSON
    fn copy_last_submission(&mut self) -> Result<()> {
        let Some(entry) = self.state.last_submission() else {
            self.status_message = Some("Nothing submitted yet".to_string());
            return Ok(());
        };
        let text = serde_json::to_string_pretty(&entry.values)?;
        let len = text.len();
        copy_to_clipboard(&text)?;
        self.status_message = Some(format!("Copied {len} chars"));
        Ok(())
    }

    /// Wait for the in-flight submission and apply it
    #[cfg(test)]
    async fn settle_submission(&mut self) {
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.complete_submission(outcome);
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldId;
    use crate::submit::MockSubmitHandler;
    use anyhow::anyhow;

    fn app_with(handler: MockSubmitHandler) -> App {
        App::with_handler(TuiConfig::default(), Arc::new(handler))
    }

    fn fill_valid(app: &mut App) {
        let form = &mut app.state.form;
        form.set_value(FieldId::Name, "abcd");
        form.set_value(FieldId::Email, "foo@bar.com");
        form.set_value(FieldId::Password, "abc12!");
        form.set_value(FieldId::PrimaryMobile, "9876543210");
        form.set_value(FieldId::Age, "21");
        form.set_value(FieldId::Date, "2024-01-05");
        form.set_value(FieldId::Pincode, "123456");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_submit_calls_handler_once_with_coerced_values() {
            let mut handler = MockSubmitHandler::new();
            handler
                .expect_submit()
                .withf(|v| {
                    v.name == "abcd"
                        && v.mobile_numbers.0 == 9876543210
                        && v.mobile_numbers.1.is_none()
                        && v.age == Some(21.0)
                        && v.address.pincode == 123456
                        && v.date.to_string() == "2024-01-05"
                })
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(handler);
            fill_valid(&mut app);

            app.handle_key(ctrl('s')).unwrap();
            assert!(app.state.submit_status.is_submitting());

            app.settle_submission().await;
            assert!(!app.state.submit_status.is_submitting());
            assert_eq!(app.state.console.len(), 1);
            assert_eq!(app.state.total_submissions, 1);
            assert_eq!(app.state.console[0].values.email, "foo@bar.com");
        }

        #[tokio::test]
        async fn test_invalid_submit_never_calls_handler() {
            let mut handler = MockSubmitHandler::new();
            handler.expect_submit().never();
            let mut app = app_with(handler);
            fill_valid(&mut app);
            app.state.form.set_value(FieldId::Name, "abc");

            assert_eq!(app.submit(), Err(SubmitError::Invalid { count: 1 }));
            assert!(!app.state.submit_status.is_submitting());
            assert_eq!(
                app.state.form.field(FieldId::Name).error.as_ref().map(|e| e.message.as_str()),
                Some("name should be atleast 4 char")
            );
        }

        #[tokio::test]
        async fn test_invalid_submit_reports_in_status_bar() {
            let mut handler = MockSubmitHandler::new();
            handler.expect_submit().never();
            let mut app = app_with(handler);

            app.handle_key(ctrl('s')).unwrap();
            assert!(app
                .status_message
                .as_deref()
                .is_some_and(|m| m.ends_with("need attention")));
        }

        #[tokio::test]
        async fn test_second_submit_rejected_while_in_flight() {
            let mut handler = MockSubmitHandler::new();
            handler.expect_submit().times(1).returning(|_| Ok(()));
            let mut app = app_with(handler);
            fill_valid(&mut app);

            assert_eq!(app.submit(), Ok(()));
            assert_eq!(app.submit(), Err(SubmitError::AlreadySubmitting));
            app.settle_submission().await;
        }

        #[tokio::test]
        async fn test_success_resets_form() {
            let mut handler = MockSubmitHandler::new();
            handler.expect_submit().times(1).returning(|_| Ok(()));
            let mut app = app_with(handler);
            fill_valid(&mut app);
            app.state.form.append_hobby();
            app.state.form.set_hobby(1, "golf").unwrap();

            app.submit().unwrap();
            app.settle_submission().await;

            let form = &app.state.form;
            assert_eq!(form.field(FieldId::Name).value(), "");
            assert_eq!(form.field(FieldId::Age).value(), "2");
            assert_eq!(form.field(FieldId::Gender).value(), "male");
            assert_eq!(form.field(FieldId::PrimaryMobile).value(), "");
            assert_eq!(form.hobbies.len(), 1);
            assert!(!form.is_submitted);
        }

        #[tokio::test]
        async fn test_handler_error_keeps_values() {
            let mut handler = MockSubmitHandler::new();
            handler
                .expect_submit()
                .times(1)
                .returning(|_| Err(anyhow!("boom")));
            let mut app = app_with(handler);
            fill_valid(&mut app);

            app.submit().unwrap();
            app.settle_submission().await;

            assert_eq!(app.state.current_error(), Some("Submit failed: boom"));
            assert_eq!(app.state.form.field(FieldId::Name).value(), "abcd");
            assert!(app.state.console.is_empty());
        }

        #[tokio::test]
        async fn test_reset_during_submit_keeps_button_disabled() {
            let mut handler = MockSubmitHandler::new();
            handler.expect_submit().times(1).returning(|_| Ok(()));
            let mut app = app_with(handler);
            fill_valid(&mut app);

            app.submit().unwrap();
            app.handle_key(ctrl('r')).unwrap();
            assert_eq!(app.state.form.field(FieldId::Name).value(), "");
            assert!(app.state.submit_status.is_submitting());
            app.settle_submission().await;
            assert_eq!(app.state.console.len(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_simulated_submit_takes_configured_delay() {
            let mut app = App::new(TuiConfig::default());
            fill_valid(&mut app);
            let start = tokio::time::Instant::now();

            app.submit().unwrap();
            app.poll_submission();
            assert!(app.state.submit_status.is_submitting());

            app.settle_submission().await;
            assert!(start.elapsed() >= Duration::from_secs(1));
            assert_eq!(app.state.console.len(), 1);
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_typing_fills_focused_field() {
            let mut app = app_with(MockSubmitHandler::new());
            for c in "Ada".chars() {
                app.handle_key(key(KeyCode::Char(c))).unwrap();
            }
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.state.form.field(FieldId::Name).value(), "Ad");
        }

        #[tokio::test]
        async fn test_enter_moves_to_next_field() {
            let mut app = app_with(MockSubmitHandler::new());
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(
                app.state.form.active_target(),
                FocusTarget::Field(FieldId::Email)
            );
        }

        #[tokio::test]
        async fn test_enter_on_add_hobby_appends() {
            let mut app = app_with(MockSubmitHandler::new());
            app.state.form.focus(FocusTarget::AddHobby);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.form.hobbies.len(), 2);
            assert_eq!(app.state.form.active_target(), FocusTarget::Hobby(1));
        }

        #[tokio::test]
        async fn test_ctrl_d_removes_only_non_first_hobby() {
            let mut app = app_with(MockSubmitHandler::new());
            app.handle_key(ctrl('n')).unwrap();
            assert_eq!(app.state.form.hobbies.len(), 2);
            app.handle_key(ctrl('d')).unwrap();
            assert_eq!(app.state.form.hobbies.len(), 1);
            app.handle_key(ctrl('d')).unwrap();
            assert_eq!(app.state.form.hobbies.len(), 1);
            assert!(app.status_message.is_some());
        }

        #[tokio::test]
        async fn test_enter_on_reset_restores_defaults() {
            let mut app = app_with(MockSubmitHandler::new());
            fill_valid(&mut app);
            app.state.form.focus(FocusTarget::Reset);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.state.form.is_dirty());
            assert_eq!(app.status_message.as_deref(), Some("Form reset"));
        }

        #[tokio::test]
        async fn test_arrows_cycle_gender() {
            let mut app = app_with(MockSubmitHandler::new());
            app.state.form.focus(FocusTarget::Field(FieldId::Gender));
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.state.form.field(FieldId::Gender).value(), "other");
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert_eq!(app.state.form.field(FieldId::Gender).value(), "female");
        }

        #[tokio::test]
        async fn test_error_dialog_is_modal() {
            let mut app = app_with(MockSubmitHandler::new());
            app.push_error("oops");
            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(app.state.form.field(FieldId::Name).value(), "");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_copy_without_submission_sets_status() {
            let mut app = app_with(MockSubmitHandler::new());
            app.handle_key(KeyEvent::new(
                KeyCode::Char('y'),
                crate::platform::COPY_MODIFIER,
            ))
            .unwrap();
            assert_eq!(app.status_message.as_deref(), Some("Nothing submitted yet"));
        }

        #[tokio::test]
        async fn test_ctrl_q_quits() {
            let mut app = app_with(MockSubmitHandler::new());
            assert!(!app.should_quit());
            app.handle_key(ctrl('q')).unwrap();
            assert!(app.should_quit());
        }
    }
}
