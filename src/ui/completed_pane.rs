use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{
    border_style, done_style, focused_border_style, selected_style, title_style,
    unfocused_selected_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the completed tasks pane for the selected day
pub fn render_completed_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Completed;

    let items: Vec<ListItem> = app
        .selected_day()
        .completed
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = Line::from(vec![
                Span::raw("✓ "),
                Span::styled(task.text.clone(), done_style()),
            ]);
            let item = ListItem::new(line);
            match (idx == app.completed_cursor, focused) {
                (true, true) => item.style(selected_style()),
                (true, false) => item.style(unfocused_selected_style()),
                _ => item,
            }
        })
        .collect();

    let title = match app.completed_summary() {
        Some(summary) => format!(" {} ", summary),
        None => " Completed ".to_string(),
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                focused_border_style()
            } else {
                border_style()
            })
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
