//! Layout components (header, panels, status bar)

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the action panel on the right
const ACTION_PANEL_WIDTH: u16 = 26;
/// Height of the console panel at the bottom
const CONSOLE_HEIGHT: u16 = 8;

/// Screen regions for the form view
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub form: Rect,
    pub actions: Rect,
    pub console: Rect,
    pub status: Rect,
}

/// Split the terminal into header, form/actions, console and status bar
pub fn create_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Header
            Constraint::Min(8),                 // Form + actions
            Constraint::Length(CONSOLE_HEIGHT), // Console
            Constraint::Length(1),              // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),                    // Form
            Constraint::Length(ACTION_PANEL_WIDTH), // Action panel
        ])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        form: columns[0],
        actions: columns[1],
        console: rows[2],
        status: rows[3],
    }
}

/// Draw the title line
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Profile Form ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "- submitted records appear in the console below",
            Style::default().fg(Color::Blue),
        ),
    ]));
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(
            " Tab:next  Enter:select  {SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  ^N:add hobby  ^D:remove hobby  {COPY_SHORTCUT}:copy  ^P:password  ^Q:quit"
        ),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
