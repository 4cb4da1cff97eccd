//! Profile form rendering

use super::field_renderer::{button_line, field_lines, heading, item};
use crate::app::App;
use crate::state::{FieldId, FocusTarget, Form};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Build one list item per focusable row above the action buttons
fn build_items(app: &App) -> Vec<ListItem<'static>> {
    let form = &app.state.form;
    let active = form.active_target();
    let mask = app.state.mask_password;
    let mut items = Vec::new();

    for index in 0..form.field_count() {
        let target = form.target_at(index);
        let is_active = target == active;

        let mut lines: Vec<Line<'static>> = Vec::new();
        match target {
            FocusTarget::Field(id) => {
                if id == FieldId::City {
                    lines.push(Line::from(""));
                    lines.push(heading("Address"));
                }
                lines.extend(field_lines(form.field(id), is_active, mask, false));
            }
            FocusTarget::Hobby(i) => {
                if i == 0 {
                    lines.push(Line::from(""));
                    lines.push(heading("Hobbies"));
                }
                if let Some(entry) = form.hobbies.get(i) {
                    lines.extend(field_lines(&entry.value, is_active, mask, i > 0));
                }
            }
            FocusTarget::AddHobby => lines.push(button_line("+ Add new hobby", is_active)),
            // Submit and Reset live in the action panel
            FocusTarget::Submit | FocusTarget::Reset => break,
        }
        items.push(item(lines));
    }

    items
}

/// Draw the scrollable form, keeping the focused row visible
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let items = build_items(app);
    let last = items.len().saturating_sub(1);

    let on_buttons = matches!(
        form.active_target(),
        FocusTarget::Submit | FocusTarget::Reset
    );
    let border_color = if on_buttons {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Profile ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );

    let mut list_state = ListState::default().with_selected(Some(form.active_field().min(last)));
    frame.render_stateful_widget(list, area, &mut list_state);
}
