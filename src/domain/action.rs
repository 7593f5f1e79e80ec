use super::date_key::DateKey;
use super::enums::ActionKind;
use super::task::Task;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reversible action held by the undo buffer.
///
/// `task_index` is the position the task occupied when the action was taken
/// (for `Restore`, the position it was appended at). Reversal locates the
/// task by id and only uses the index as the re-insertion point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum UndoEntry {
    #[serde(rename_all = "camelCase")]
    Edit {
        date: DateKey,
        task_index: usize,
        task_id: Uuid,
        old_text: String,
        new_text: String,
    },
    #[serde(rename_all = "camelCase")]
    Delete {
        date: DateKey,
        task_index: usize,
        task: Task,
    },
    #[serde(rename_all = "camelCase")]
    Complete {
        date: DateKey,
        task_index: usize,
        task: Task,
    },
    #[serde(rename_all = "camelCase")]
    Restore {
        date: DateKey,
        task_index: usize,
        completed_index: usize,
        task: Task,
    },
}

impl UndoEntry {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Edit { .. } => ActionKind::Edit,
            Self::Delete { .. } => ActionKind::Delete,
            Self::Complete { .. } => ActionKind::Complete,
            Self::Restore { .. } => ActionKind::Restore,
        }
    }

    pub fn date(&self) -> DateKey {
        match self {
            Self::Edit { date, .. }
            | Self::Delete { date, .. }
            | Self::Complete { date, .. }
            | Self::Restore { date, .. } => *date,
        }
    }

    pub fn task_index(&self) -> usize {
        match self {
            Self::Edit { task_index, .. }
            | Self::Delete { task_index, .. }
            | Self::Complete { task_index, .. }
            | Self::Restore { task_index, .. } => *task_index,
        }
    }

    /// Banner text, e.g. "Undo delete"
    pub fn label(&self) -> String {
        format!("Undo {}", self.kind().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn test_wire_format_matches_storage_layout() {
        let task = Task::new("Buy milk");
        let entry = UndoEntry::Delete {
            date: day(),
            task_index: 1,
            task: task.clone(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action"], "delete");
        assert_eq!(value["date"], "2026-10-18");
        assert_eq!(value["taskIndex"], 1);
        assert_eq!(value["task"]["text"], "Buy milk");
    }

    #[test]
    fn test_edit_entry_fields() {
        let entry = UndoEntry::Edit {
            date: day(),
            task_index: 0,
            task_id: Uuid::new_v4(),
            old_text: "X".to_string(),
            new_text: "Y".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action"], "edit");
        assert_eq!(value["oldText"], "X");
        assert_eq!(value["newText"], "Y");
        assert_eq!(entry.kind(), ActionKind::Edit);
        assert_eq!(entry.label(), "Undo edit");
    }

    #[test]
    fn test_accessors() {
        let entry = UndoEntry::Restore {
            date: day(),
            task_index: 3,
            completed_index: 0,
            task: Task::new("T"),
        };
        assert_eq!(entry.date(), day());
        assert_eq!(entry.task_index(), 3);
        assert_eq!(entry.kind(), ActionKind::Restore);
    }
}
