use crate::app::AppState;
use crate::domain::{DateKey, Week, WEEKDAY_LABELS};
use crate::ui::styles::{
    border_style, calendar_has_tasks_style, calendar_selected_style, calendar_today_style,
    default_style, hint_style, title_style,
};
use chrono::Datelike;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Style for one day cell; selection wins over today, today over has-tasks
fn day_style(app: &AppState, date: DateKey) -> Style {
    if date == app.selected {
        calendar_selected_style()
    } else if date == app.today {
        calendar_today_style()
    } else if app.ledger.has_tasks(&date) {
        calendar_has_tasks_style()
    } else {
        default_style()
    }
}

fn week_line(app: &AppState, week: &Week) -> Line<'static> {
    let mut spans = Vec::with_capacity(14);
    for (col, cell) in week.iter().enumerate() {
        if col > 0 {
            spans.push(Span::raw(" "));
        }
        match cell {
            Some(date) => spans.push(Span::styled(
                format!("{:>2}", date.date().day()),
                day_style(app, *date),
            )),
            None => spans.push(Span::raw("  ")),
        }
    }
    Line::from(spans)
}

/// Weekday header followed by one line per week
fn calendar_lines(app: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(WEEKDAY_LABELS.join(" "), hint_style())];
    lines.extend(app.month.weeks().iter().map(|week| week_line(app, week)));
    lines
}

/// Render the month calendar pane
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let title = format!(" {} ", app.month.title());
    let paragraph = Paragraph::new(calendar_lines(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerSettings, TaskLedger};
    use crate::persistence::kv::memory::MemoryStore;
    use crate::undo::DEFAULT_UNDO_TIMEOUT;

    fn create_test_app() -> AppState {
        let ledger = TaskLedger::open(
            Box::new(MemoryStore::new()),
            LedgerSettings {
                undo_timeout: DEFAULT_UNDO_TIMEOUT,
                prune_empty_days: false,
            },
        );
        AppState::new(ledger, "2026-10-18".parse().unwrap())
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_calendar_lines_layout() {
        let app = create_test_app();
        let lines = calendar_lines(&app);

        // Header plus five weeks for October 2026
        assert_eq!(lines.len(), 6);
        assert_eq!(line_text(&lines[0]), "Su Mo Tu We Th Fr Sa");
        assert_eq!(line_text(&lines[1]), "             1  2  3");
        assert_eq!(line_text(&lines[4]), "18 19 20 21 22 23 24");
    }

    #[test]
    fn test_day_style_markers() {
        let mut app = create_test_app();
        let today = app.today;
        let tomorrow = today.next_day();
        let later = tomorrow.next_day();
        app.ledger.add_task(&later, "Dentist");

        assert_eq!(day_style(&app, today), calendar_selected_style());
        assert_eq!(day_style(&app, later), calendar_has_tasks_style());
        assert_eq!(day_style(&app, tomorrow), default_style());

        app.select_date(tomorrow);
        assert_eq!(day_style(&app, today), calendar_today_style());
        assert_eq!(day_style(&app, tomorrow), calendar_selected_style());
    }
}
