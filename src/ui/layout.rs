use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the calendar pane: 7 cells of 3 columns plus borders
const CALENDAR_WIDTH: u16 = 25;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub calendar_area: Rect,
    pub tasks_area: Rect,
    pub completed_area: Rect,
    pub banner_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: Calendar (fixed width) | Tasks above Completed
/// - Bottom bar: undo banner (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Undo banner
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CALENDAR_WIDTH), // Calendar pane
            Constraint::Min(0),                 // Task panes
        ])
        .split(main_chunks[1]);

    let task_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Pending tasks
            Constraint::Percentage(40), // Completed tasks
        ])
        .split(horizontal[1]);

    MainLayout {
        keybindings_area: main_chunks[0],
        calendar_area: horizontal[0],
        tasks_area: task_split[0],
        completed_area: task_split[1],
        banner_area: main_chunks[2],
    }
}

/// Create centered area for the input line
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Percentage(40),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
