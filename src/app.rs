use crate::domain::{DateKey, DayRecord, Focus, MonthView, UiMode};
use crate::ledger::TaskLedger;
use std::time::Instant;

/// Main application state: the ledger plus everything the views need
/// that is not persisted (selection, focus, input line).
pub struct AppState {
    pub ledger: TaskLedger,
    pub today: DateKey,
    pub selected: DateKey,
    pub month: MonthView,
    pub focus: Focus,
    pub task_cursor: usize,
    pub completed_cursor: usize,
    pub ui_mode: UiMode,
    pub input: String,
}

impl AppState {
    pub fn new(ledger: TaskLedger, today: DateKey) -> Self {
        Self {
            ledger,
            today,
            selected: today,
            month: MonthView::containing(today),
            focus: Focus::Tasks,
            task_cursor: 0,
            completed_cursor: 0,
            ui_mode: UiMode::Normal,
            input: String::new(),
        }
    }

    pub fn selected_day(&self) -> &DayRecord {
        self.ledger.day(&self.selected)
    }

    /// Select a day; any open edit is abandoned
    pub fn select_date(&mut self, date: DateKey) {
        if self.ui_mode == UiMode::EditingTask {
            self.cancel_input();
        }
        self.ledger.cancel_edit();
        self.selected = date;
        if !self.month.contains(date) {
            self.month = MonthView::containing(date);
        }
        self.task_cursor = 0;
        self.completed_cursor = 0;
    }

    pub fn next_day(&mut self) {
        self.select_date(self.selected.next_day());
    }

    pub fn prev_day(&mut self) {
        self.select_date(self.selected.prev_day());
    }

    /// Show the next month and select its first day
    pub fn next_month(&mut self) {
        self.select_date(self.month.next().first_day());
    }

    /// Show the previous month and select its first day
    pub fn prev_month(&mut self) {
        self.select_date(self.month.prev().first_day());
    }

    pub fn go_today(&mut self) {
        self.select_date(self.today);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
        self.clamp_cursors();
    }

    pub fn move_cursor_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.focused_len();
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Tasks => &mut self.task_cursor,
            Focus::Completed => &mut self.completed_cursor,
        }
    }

    fn focused_len(&self) -> usize {
        let day = self.selected_day();
        match self.focus {
            Focus::Tasks => day.tasks.len(),
            Focus::Completed => day.completed.len(),
        }
    }

    fn clamp_cursors(&mut self) {
        let (tasks, completed) = {
            let day = self.selected_day();
            (day.tasks.len(), day.completed.len())
        };
        self.task_cursor = self.task_cursor.min(tasks.saturating_sub(1));
        self.completed_cursor = self.completed_cursor.min(completed.saturating_sub(1));
    }

    /// Open the input line for a new task
    pub fn start_add_task(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the input line on the task under the cursor
    pub fn start_edit_selected(&mut self) {
        if self.focus != Focus::Tasks {
            return;
        }
        let index = self.task_cursor;
        let Some(text) = self.selected_day().tasks.get(index).map(|t| t.text.clone()) else {
            return;
        };
        if self.ledger.start_edit(&self.selected, index) {
            self.input = text;
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Submit the input line as a new task or as the edited text
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        match self.ui_mode {
            UiMode::AddingTask => {
                if self.ledger.add_task(&self.selected, &text) {
                    self.focus = Focus::Tasks;
                    self.task_cursor = self.selected_day().tasks.len().saturating_sub(1);
                }
            }
            UiMode::EditingTask => {
                if let Some(index) = self.ledger.editing_index(&self.selected) {
                    self.ledger.save_edit(&self.selected, index, &text);
                } else {
                    self.ledger.cancel_edit();
                }
            }
            UiMode::Normal => {}
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_input(&mut self) {
        if self.ui_mode == UiMode::EditingTask {
            self.ledger.cancel_edit();
        }
        self.input.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Complete the selected pending task, or restore the selected completed one
    pub fn toggle_selected(&mut self) {
        match self.focus {
            Focus::Tasks => {
                self.ledger.mark_completed(&self.selected, self.task_cursor);
            }
            Focus::Completed => {
                self.ledger.restore_task(&self.selected, self.completed_cursor);
            }
        }
        self.clamp_cursors();
    }

    pub fn delete_selected(&mut self) {
        if self.focus == Focus::Tasks {
            self.ledger.delete_task(&self.selected, self.task_cursor);
            self.clamp_cursors();
        }
    }

    pub fn undo(&mut self) {
        if self.ledger.undo() {
            self.clamp_cursors();
        }
    }

    pub fn dismiss_undo(&mut self) {
        self.ledger.dismiss_undo();
    }

    /// Advance timers; returns true when something visible changed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.ledger.tick(now)
    }

    /// Track the wall-clock date. A selection still on the old today follows
    /// to the new one unless the input line is open.
    pub fn roll_over(&mut self, today: DateKey) -> bool {
        if today == self.today {
            return false;
        }
        let previous = std::mem::replace(&mut self.today, today);
        if self.selected == previous && self.ui_mode == UiMode::Normal {
            self.select_date(today);
        }
        true
    }

    /// Heading over the task list
    pub fn headline(&self) -> String {
        if self.selected == self.today {
            "Today's Tasks".to_string()
        } else {
            format!("Tasks for {}", self.selected.long_label())
        }
    }

    /// Undo banner text with the seconds left, if an undo is pending
    pub fn undo_banner(&self, now: Instant) -> Option<String> {
        let entry = self.ledger.pending_undo()?;
        let secs = self
            .ledger
            .undo_remaining(now)
            .map(|d| d.as_secs_f32().ceil() as u64)
            .unwrap_or(0);
        Some(format!("↶ {} ({}s)", entry.label(), secs))
    }

    /// "Completed: N" when anything was completed on the selected day
    pub fn completed_summary(&self) -> Option<String> {
        let count = self.selected_day().completed.len();
        (count > 0).then(|| format!("Completed: {}", count))
    }
}
