use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task on a day's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id; data written without ids gets a fresh one on load
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// Pending and completed tasks for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub completed: Vec<Task>,
}

impl DayRecord {
    pub const EMPTY: DayRecord = DayRecord {
        tasks: Vec::new(),
        completed: Vec::new(),
    };

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.completed.is_empty()
    }

    /// Index of a pending task by id
    pub fn task_position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Index of a completed task by id
    pub fn completed_position(&self, id: Uuid) -> Option<usize> {
        self.completed.iter().position(|t| t.id == id)
    }

    /// Whether the task id is on either list
    pub fn contains(&self, id: Uuid) -> bool {
        self.task_position(id).is_some() || self.completed_position(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new_assigns_unique_ids() {
        let a = Task::new("A");
        let b = Task::new("A");
        assert_eq!(a.text, "A");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_task_without_id_deserializes() {
        let task: Task = serde_json::from_str(r#"{"text":"Buy milk"}"#).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.id.is_nil());
    }

    #[test]
    fn test_day_record_missing_lists_default_to_empty() {
        let day: DayRecord = serde_json::from_str(r#"{"tasks":[{"text":"X"}]}"#).unwrap();
        assert_eq!(day.tasks.len(), 1);
        assert!(day.completed.is_empty());
    }

    #[test]
    fn test_positions_by_id() {
        let a = Task::new("A");
        let b = Task::new("B");
        let day = DayRecord {
            tasks: vec![a.clone()],
            completed: vec![b.clone()],
        };
        assert_eq!(day.task_position(a.id), Some(0));
        assert_eq!(day.completed_position(b.id), Some(0));
        assert_eq!(day.task_position(b.id), None);
        assert!(day.contains(b.id));
        assert!(!day.is_empty());
        assert!(DayRecord::EMPTY.is_empty());
    }
}
