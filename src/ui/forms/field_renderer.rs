//! Row rendering utilities for forms

use crate::state::{FieldKind, FormField};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// Column width reserved for field labels
const LABEL_WIDTH: usize = 24;

fn marker(is_active: bool) -> Span<'static> {
    if is_active {
        Span::styled("▶ ", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("  ")
    }
}

/// Label with a `*` suffix when a value is required
fn required_label(field: &FormField) -> String {
    if field.rules.is_required() {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    }
}

/// Section heading shown above a group of rows
pub fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Build the lines for a field row: `Label : value`, plus its error if any
pub fn field_lines(
    field: &FormField,
    is_active: bool,
    mask_secrets: bool,
    removable: bool,
) -> Vec<Line<'static>> {
    let label_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        marker(is_active),
        Span::styled(format!("{:<LABEL_WIDTH$}", required_label(field)), label_style),
        Span::styled(": ", Style::default().fg(Color::DarkGray)),
    ];

    let display = field.display_value(mask_secrets);
    if display.is_empty() && !is_active {
        spans.push(Span::styled(
            field.placeholder.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        let value_style = if is_active {
            Style::default().fg(Color::White)
        } else {
            Style::default()
        };
        spans.push(Span::styled(display, value_style));
        if is_active && !matches!(field.kind, FieldKind::Choice(_)) {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }

    if is_active && field.is_choice() {
        spans.push(Span::styled("  ←/→", Style::default().fg(Color::DarkGray)));
    }

    if removable {
        spans.push(Span::styled(
            "  [Remove ^D]",
            Style::default().fg(if is_active { Color::Red } else { Color::DarkGray }),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(error) = &field.error {
        lines.push(Line::from(Span::styled(
            format!("    ✗ {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// Build an inline button row such as `[+ Add new hobby]`
pub fn button_line(label: &str, is_active: bool) -> Line<'static> {
    let style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    Line::from(vec![marker(is_active), Span::styled(format!("[{label}]"), style)])
}

/// Wrap row lines into a list item
pub fn item(lines: Vec<Line<'static>>) -> ListItem<'static> {
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rules;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_inactive_empty_field_shows_placeholder() {
        let field = FormField::text("name", "Name").with_placeholder("full name");
        let lines = field_lines(&field, false, true, false);
        assert_eq!(lines.len(), 1);
        assert!(text_of(&lines[0]).ends_with("full name"));
    }

    #[test]
    fn test_active_field_shows_cursor() {
        let field = FormField::text("name", "Name").with_default("Ada");
        let lines = field_lines(&field, true, true, false);
        assert!(text_of(&lines[0]).ends_with("Ada▌"));
    }

    #[test]
    fn test_error_adds_second_line() {
        let mut field =
            FormField::text("name", "Name").with_rules(Rules::new().required("name is required"));
        let _ = field.validate();
        let lines = field_lines(&field, false, true, false);
        assert_eq!(lines.len(), 2);
        assert!(text_of(&lines[1]).contains("name is required"));
    }

    #[test]
    fn test_secret_is_masked() {
        let field = FormField::secret("password", "Password").with_default("ab1!");
        let lines = field_lines(&field, false, true, false);
        assert!(text_of(&lines[0]).ends_with("****"));
    }

    #[test]
    fn test_required_label_is_marked() {
        let field =
            FormField::text("email", "Email").with_rules(Rules::new().required("Email is required"));
        let lines = field_lines(&field, false, true, false);
        assert!(text_of(&lines[0]).starts_with("  Email *"));
    }

    #[test]
    fn test_removable_row_shows_control() {
        let field = FormField::text("hobbies.1.hobby", "Hobby 2");
        let lines = field_lines(&field, false, true, true);
        assert!(text_of(&lines[0]).contains("[Remove ^D]"));
    }

    #[test]
    fn test_button_line() {
        assert_eq!(text_of(&button_line("+ Add new hobby", true)), "▶ [+ Add new hobby]");
    }
}
