use crate::app::AppState;
use crate::domain::{Focus, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => {
            handle_input_mode(app, key);
            false
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        // Day navigation
        KeyCode::Left | KeyCode::Char('h') => app.prev_day(),
        KeyCode::Right | KeyCode::Char('l') => app.next_day(),

        // Month navigation
        KeyCode::Char('[') => app.prev_month(),
        KeyCode::Char(']') => app.next_month(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.go_today(),

        // List navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),

        // Add / edit
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_selected(),
        KeyCode::Enter if app.focus == Focus::Tasks => app.start_edit_selected(),

        // Complete or restore
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_selected(),

        // Delete
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected(),

        // Undo / dismiss
        KeyCode::Char('u') | KeyCode::Char('U') => app.undo(),
        KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => app.undo(),
        KeyCode::Esc => app.dismiss_undo(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        _ => {}
    }
    false
}

/// Handle keys while the input line is open
fn handle_input_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_add_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateKey;
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
        AppState::new(ledger, "2026-10-18".parse::<DateKey>().unwrap())
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_task_via_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        // Keys that are commands in normal mode are plain text here
        type_text(&mut app, "quit dx");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_day().tasks[0].text, "quit dx");
    }

    #[test]
    fn test_complete_then_undo_via_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.selected_day().tasks.is_empty());
        assert_eq!(app.selected_day().completed.len(), 1);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.selected_day().tasks[0].text, "Buy milk");
        assert!(app.selected_day().completed.is_empty());
    }

    #[test]
    fn test_escape_dismisses_undo() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "A");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.ledger.pending_undo().is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.ledger.pending_undo().is_none());
    }

    #[test]
    fn test_escape_cancels_input() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.selected_day().tasks.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_day_navigation_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected.to_string(), "2026-10-19");
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.selected.to_string(), "2026-10-17");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.selected.to_string(), "2026-10-18");
    }
}
