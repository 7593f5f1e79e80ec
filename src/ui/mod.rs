pub mod calendar_pane;
pub mod completed_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod styles;
pub mod task_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use calendar_pane::render_calendar_pane;
use completed_pane::render_completed_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use std::time::Instant;
use styles::banner_style;
use task_pane::render_task_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area, app.ui_mode);

    render_calendar_pane(f, app, layout.calendar_area);
    render_task_pane(f, app, layout.tasks_area);
    render_completed_pane(f, app, layout.completed_area);

    if let Some(banner) = app.undo_banner(Instant::now()) {
        let text = format!(" {}  (u to undo, Esc to dismiss) ", banner);
        f.render_widget(
            Paragraph::new(Span::styled(text, banner_style())),
            layout.banner_area,
        );
    }

    if app.ui_mode != UiMode::Normal {
        render_input_form(f, app, size);
    }
}
