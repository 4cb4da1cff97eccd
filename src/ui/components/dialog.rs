//! Error dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let area = frame.area();
    let inner_width = usize::from(MAX_WIDTH.min(area.width).saturating_sub(4)).max(1);
    let wrapped = wrap_text(error_message, inner_width);

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped.iter().map(|l| Line::from(l.clone())));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]));

    let widest = wrapped
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max("Press Enter or Esc to dismiss".len());
    let width = (widest as u16 + 4).min(MAX_WIDTH).min(area.width);
    let height = (content.len() as u16 + 2).min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        ),
        dialog_area,
    );
}

/// Wrap text on whitespace, splitting words longer than a line
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            loop {
                let used = current.chars().count();
                let gap = usize::from(used > 0);
                if used + gap + word.len() <= max_width {
                    if gap == 1 {
                        current.push(' ');
                    }
                    current.extend(word.iter());
                    break;
                }
                if used > 0 {
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
                let rest = word.split_off(max_width);
                lines.push(word.iter().collect());
                word = rest;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
