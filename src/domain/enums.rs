use serde::{Deserialize, Serialize};

/// Kind of reversible action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Edit,
    Delete,
    Complete,
    Restore,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Complete => "complete",
            Self::Restore => "restore",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
}

/// Which list has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tasks,
    Completed,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Tasks => Self::Completed,
            Self::Completed => Self::Tasks,
        }
    }
}
