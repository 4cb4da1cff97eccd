//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered action button.
///
/// `accent` colors the label of an enabled, unfocused button.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let border_style = match (is_selected, is_enabled) {
        (true, true) => Style::default().fg(Color::Cyan),
        (true, false) => Style::default().fg(Color::Gray),
        _ => Style::default().fg(Color::DarkGray),
    };

    let text_style = if !is_enabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        accent.map_or_else(Style::default, |c| Style::default().fg(c))
    };

    let paragraph = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(paragraph, area);
}
