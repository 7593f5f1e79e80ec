pub mod action;
pub mod calendar;
pub mod date_key;
pub mod enums;
pub mod task;

pub use action::UndoEntry;
pub use calendar::{MonthView, Week, WEEKDAY_LABELS};
pub use date_key::DateKey;
pub use enums::{ActionKind, Focus, UiMode};
pub use task::{DayRecord, Task};
