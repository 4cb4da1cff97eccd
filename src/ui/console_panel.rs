//! Console panel listing submitted records

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the newest submissions that fit, oldest at the top
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" Console ({}) ", app.state.console.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let visible = usize::from(area.height.saturating_sub(2));
    let skip = app.state.console.len().saturating_sub(visible);

    let lines: Vec<Line> = if app.state.console.is_empty() {
        vec![Line::from(Span::styled(
            "No submissions yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.state
            .console
            .iter()
            .skip(skip)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", entry.at.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(entry.json()),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuiConfig;
    use crate::state::{FieldId, FormValues, ProfileForm};
    use crate::submit::MockSubmitHandler;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn submitted(name: &str) -> FormValues {
        let mut form = ProfileForm::default();
        form.set_value(FieldId::Name, name);
        form.set_value(FieldId::Email, "foo@bar.com");
        form.set_value(FieldId::Password, "abc12!");
        form.set_value(FieldId::PrimaryMobile, "9876543210");
        form.set_value(FieldId::Age, "21");
        form.set_value(FieldId::Date, "2024-01-05");
        form.set_value(FieldId::Pincode, "123456");
        form.handle_submit().unwrap()
    }

    fn render(app: &App, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(200, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, app)
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| (0..200u16).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_console() {
        let app = App::with_handler(TuiConfig::default(), Arc::new(MockSubmitHandler::new()));
        let rows = render(&app, 4);
        assert!(rows[0].contains("Console (0)"));
        assert!(rows[1].contains("No submissions yet"));
    }

    #[tokio::test]
    async fn test_keeps_newest_entries() {
        let mut app =
            App::with_handler(TuiConfig::default(), Arc::new(MockSubmitHandler::new()));
        for name in ["first", "second", "third"] {
            app.state.record_submission(submitted(name));
        }

        let rows = render(&app, 4);
        assert!(rows[0].contains("Console (3)"));
        assert!(rows[1].contains(r#""name":"second""#));
        assert!(rows[2].contains(r#""name":"third""#));
    }
}
