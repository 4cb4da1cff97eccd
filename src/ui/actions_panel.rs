//! Submit/reset controls and form state flags

use super::components::{render_action_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::FocusTarget;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

fn flag(label: &str, value: String, highlight: bool) -> Line<'static> {
    let value_style = if highlight {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

/// Draw the action panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Length(1),             // Progress
            Constraint::Min(0),                // Flags
        ])
        .split(inner);

    let form = &app.state.form;
    let active = form.active_target();
    let submitting = app.state.submit_status.is_submitting();

    let submit_label = if submitting { "Submitting..." } else { "Submit" };
    render_action_button(
        frame,
        rows[0],
        submit_label,
        active == FocusTarget::Submit,
        !submitting,
        Some(Color::Green),
    );
    render_action_button(
        frame,
        rows[1],
        "Reset",
        active == FocusTarget::Reset,
        true,
        None,
    );

    if submitting {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(app.state.submit_status.progress().clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, rows[2]);
    }

    let errors = form.error_count();
    let flags = vec![
        flag("submitted", form.is_submitted.to_string(), false),
        flag("attempts", form.submit_count.to_string(), false),
        flag("dirty", form.is_dirty().to_string(), false),
        flag("errors", errors.to_string(), errors > 0),
        flag("accepted", app.state.total_submissions.to_string(), false),
    ];
    frame.render_widget(Paragraph::new(flags), rows[3]);
}
