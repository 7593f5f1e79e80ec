use crate::domain::{DateKey, DayRecord, Task, UndoEntry};
use crate::persistence::{KeyValueStore, Store};
use crate::undo::UndoBuffer;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Task being edited; only one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    pub date: DateKey,
    pub index: usize,
}

/// Tunables passed in from config
#[derive(Debug, Clone, Copy)]
pub struct LedgerSettings {
    pub undo_timeout: Duration,
    pub prune_empty_days: bool,
}

/// The task state machine.
///
/// Every mutating operation updates the day's record, registers the matching
/// undo entry, and persists the store before returning. Operations return
/// `true` when state changed and the view needs to be redrawn.
pub struct TaskLedger {
    kv: Box<dyn KeyValueStore>,
    store: Store,
    undo: UndoBuffer,
    editing: Option<EditTarget>,
}

impl TaskLedger {
    pub fn open(mut kv: Box<dyn KeyValueStore>, settings: LedgerSettings) -> Self {
        let mut store = Store::load(kv.as_mut());
        if settings.prune_empty_days {
            let pruned = store.prune_empty();
            if pruned > 0 {
                info!("Pruned {} empty day records", pruned);
            }
        }
        let undo = UndoBuffer::load(kv.as_mut(), settings.undo_timeout);
        info!("Opened ledger with {} day records", store.len());

        Self {
            kv,
            store,
            undo,
            editing: None,
        }
    }

    pub fn day(&self, date: &DateKey) -> &DayRecord {
        self.store.get(date)
    }

    pub fn has_record(&self, date: &DateKey) -> bool {
        self.store.contains(date)
    }

    pub fn has_tasks(&self, date: &DateKey) -> bool {
        self.store.has_tasks(date)
    }

    pub fn pending_undo(&self) -> Option<&UndoEntry> {
        self.undo.current()
    }

    pub fn undo_remaining(&self, now: Instant) -> Option<Duration> {
        self.undo.remaining(now)
    }

    /// Index being edited on `date`, if any
    pub fn editing_index(&self, date: &DateKey) -> Option<usize> {
        self.editing
            .filter(|target| target.date == *date)
            .map(|target| target.index)
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.kv.as_mut()) {
            warn!("Could not save tasks: {}", e);
        }
    }

    fn end_edit_on(&mut self, date: &DateKey) {
        if self.editing.is_some_and(|target| target.date == *date) {
            self.editing = None;
        }
    }

    /// Append a task; blank text is ignored. Not undoable.
    pub fn add_task(&mut self, date: &DateKey, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        self.store.ensure(date).tasks.push(Task::new(text));
        self.persist();
        debug!("Added task on {}", date);
        true
    }

    pub fn start_edit(&mut self, date: &DateKey, index: usize) -> bool {
        if index >= self.store.get(date).tasks.len() {
            warn!("Inconsistent edit: no task {} on {}", index, date);
            return false;
        }
        self.editing = Some(EditTarget { date: *date, index });
        true
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Replace a task's text. Blank or unchanged text leaves the task alone.
    /// Editing state is cleared either way.
    pub fn save_edit(&mut self, date: &DateKey, index: usize, new_text: &str) -> bool {
        self.editing = None;

        let new_text = new_text.trim();
        if new_text.is_empty() {
            return false;
        }

        let Some(task) = self.store.get(date).tasks.get(index) else {
            warn!("Inconsistent edit: no task {} on {}", index, date);
            return false;
        };
        if task.text == new_text {
            return false;
        }

        let entry = UndoEntry::Edit {
            date: *date,
            task_index: index,
            task_id: task.id,
            old_text: task.text.clone(),
            new_text: new_text.to_string(),
        };
        self.undo.set(entry, self.kv.as_mut());

        self.store.ensure(date).tasks[index].text = new_text.to_string();
        self.persist();
        true
    }

    pub fn delete_task(&mut self, date: &DateKey, index: usize) -> bool {
        if index >= self.store.get(date).tasks.len() {
            warn!("Inconsistent delete: no task {} on {}", index, date);
            return false;
        }

        let task = self.store.ensure(date).tasks.remove(index);
        self.undo.set(
            UndoEntry::Delete {
                date: *date,
                task_index: index,
                task,
            },
            self.kv.as_mut(),
        );
        self.end_edit_on(date);
        self.persist();
        true
    }

    /// Move a pending task to the end of the completed list
    pub fn mark_completed(&mut self, date: &DateKey, index: usize) -> bool {
        if index >= self.store.get(date).tasks.len() {
            warn!("Inconsistent complete: no task {} on {}", index, date);
            return false;
        }

        let record = self.store.ensure(date);
        let task = record.tasks.remove(index);
        record.completed.push(task.clone());
        self.undo.set(
            UndoEntry::Complete {
                date: *date,
                task_index: index,
                task,
            },
            self.kv.as_mut(),
        );
        self.end_edit_on(date);
        self.persist();
        true
    }

    /// Move a completed task to the end of the pending list
    pub fn restore_task(&mut self, date: &DateKey, index: usize) -> bool {
        if index >= self.store.get(date).completed.len() {
            warn!("Inconsistent restore: no completed task {} on {}", index, date);
            return false;
        }

        let record = self.store.ensure(date);
        let task = record.completed.remove(index);
        record.tasks.push(task.clone());
        let task_index = record.tasks.len() - 1;
        self.undo.set(
            UndoEntry::Restore {
                date: *date,
                task_index,
                completed_index: index,
                task,
            },
            self.kv.as_mut(),
        );
        self.end_edit_on(date);
        self.persist();
        true
    }

    /// Reverse the pending action, if any
    pub fn undo(&mut self) -> bool {
        let Some(date) = self.undo.current().map(UndoEntry::date) else {
            return false;
        };

        let store = &mut self.store;
        let applied = self
            .undo
            .apply(self.kv.as_mut(), |entry| reverse(store.ensure(&date), entry));
        if !applied {
            warn!("Inconsistent undo on {}: target task not found", date);
        }

        self.end_edit_on(&date);
        self.persist();
        applied
    }

    pub fn dismiss_undo(&mut self) -> bool {
        self.undo.clear(self.kv.as_mut())
    }

    /// Expire the undo entry once its window has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.undo.expire_due(now, self.kv.as_mut())
    }
}

/// Apply the inverse of `entry` to its day. Tasks are located by id; the
/// captured index is only used as the re-insertion point.
fn reverse(record: &mut DayRecord, entry: &UndoEntry) -> bool {
    match entry {
        UndoEntry::Delete {
            task_index, task, ..
        } => {
            if record.contains(task.id) {
                return false;
            }
            let at = (*task_index).min(record.tasks.len());
            record.tasks.insert(at, task.clone());
            true
        }
        UndoEntry::Complete {
            task_index, task, ..
        } => {
            let Some(pos) = record.completed_position(task.id) else {
                return false;
            };
            let task = record.completed.remove(pos);
            let at = (*task_index).min(record.tasks.len());
            record.tasks.insert(at, task);
            true
        }
        UndoEntry::Edit {
            task_id, old_text, ..
        } => {
            let Some(pos) = record.task_position(*task_id) else {
                return false;
            };
            record.tasks[pos].text = old_text.clone();
            true
        }
        UndoEntry::Restore {
            completed_index,
            task,
            ..
        } => {
            let Some(pos) = record.task_position(task.id) else {
                return false;
            };
            let task = record.tasks.remove(pos);
            let at = (*completed_index).min(record.completed.len());
            record.completed.insert(at, task);
            true
        }
    }
}
