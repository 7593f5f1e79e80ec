use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, hint_style, selected_style, title_style,
    unfocused_selected_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the pending tasks pane for the selected day
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Tasks;
    let editing = app.ledger.editing_index(&app.selected);
    let day = app.selected_day();

    let items: Vec<ListItem> = if day.tasks.is_empty() {
        vec![ListItem::new(Line::styled(
            "No tasks. Press a to add one.",
            hint_style(),
        ))]
    } else {
        day.tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let marker = if editing == Some(idx) { "✎ " } else { "☐ " };
                let line = Line::from(vec![
                    Span::raw(format!("{:>2}. ", idx + 1)),
                    Span::raw(marker),
                    Span::raw(task.text.clone()),
                ]);
                let style = match (idx == app.task_cursor, focused) {
                    (true, true) => selected_style(),
                    (true, false) => unfocused_selected_style(),
                    _ => default_style(),
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let title = format!(" {} ({}) ", app.headline(), day.tasks.len());
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
