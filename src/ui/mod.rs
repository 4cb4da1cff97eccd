//! UI module for rendering the TUI

mod actions_panel;
mod components;
mod console_panel;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    layout::draw_header(frame, areas.header);
    forms::draw_profile_form(frame, areas.form, app);
    actions_panel::draw(frame, areas.actions, app);
    console_panel::draw(frame, areas.console, app);
    layout::draw_status_bar(frame, areas.status, app);

    // Error dialog overlays everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
