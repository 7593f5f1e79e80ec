use super::kv::{KeyValueStore, StoreError};
use crate::domain::{DateKey, DayRecord};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Storage key holding the full date → day mapping
pub const DATA_KEY: &str = "taskCheckerData";

static EMPTY_DAY: DayRecord = DayRecord::EMPTY;

/// All day records, keyed by date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    days: BTreeMap<DateKey, DayRecord>,
}

impl Store {
    /// Load the mapping; missing or unreadable data yields an empty store
    pub fn load(kv: &mut dyn KeyValueStore) -> Self {
        let raw = match kv.get(DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("Could not read stored tasks, starting empty: {}", e);
                Self::backup_unreadable(kv);
                return Self::default();
            }
        };

        match serde_json::from_str::<BTreeMap<DateKey, DayRecord>>(&raw) {
            Ok(days) => {
                debug!("Loaded {} day records", days.len());
                Self { days }
            }
            Err(e) => {
                warn!("Stored tasks are malformed, starting empty: {}", e);
                Self::backup_unreadable(kv);
                Self::default()
            }
        }
    }

    /// Keep a copy of the raw value before the next save replaces it
    fn backup_unreadable(kv: &mut dyn KeyValueStore) {
        if let Err(e) = kv.backup(DATA_KEY) {
            warn!("Could not back up unreadable tasks: {}", e);
        }
    }

    /// Persist the full mapping
    pub fn save(&self, kv: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.days)?;
        kv.set(DATA_KEY, &json)
    }

    /// Day record for a date, or a shared empty record when absent
    pub fn get(&self, date: &DateKey) -> &DayRecord {
        self.days.get(date).unwrap_or(&EMPTY_DAY)
    }

    /// Day record for a date, inserting an empty one when absent
    pub fn ensure(&mut self, date: &DateKey) -> &mut DayRecord {
        self.days.entry(*date).or_default()
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.days.contains_key(date)
    }

    /// Whether the day has pending tasks (calendar marker)
    pub fn has_tasks(&self, date: &DateKey) -> bool {
        self.days.get(date).is_some_and(|day| !day.tasks.is_empty())
    }

    /// Drop records whose lists are both empty; returns how many were removed
    pub fn prune_empty(&mut self) -> usize {
        let before = self.days.len();
        self.days.retain(|_, day| !day.is_empty());
        before - self.days.len()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use crate::persistence::kv::memory::MemoryStore;
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_load_missing_is_empty() {
        let mut kv = MemoryStore::new();
        let store = Store::load(&mut kv);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_load_malformed_is_empty_and_backed_up() {
        let mut kv = MemoryStore::with(DATA_KEY, "{not json");
        let store = Store::load(&mut kv);
        assert_eq!(store.len(), 0);
        assert_eq!(kv.backups, vec![DATA_KEY.to_string()]);
    }

    #[test]
    fn test_load_bad_date_key_is_empty() {
        let mut kv = MemoryStore::with(DATA_KEY, r#"{"someday":{"tasks":[],"completed":[]}}"#);
        assert_eq!(Store::load(&mut kv).len(), 0);
    }

    #[test]
    fn test_load_legacy_data_without_ids() {
        let mut kv = MemoryStore::with(
            DATA_KEY,
            r#"{"2026-10-18":{"tasks":[{"text":"A"},{"text":"B"}],"completed":[{"text":"C"}]}}"#,
        );
        let store = Store::load(&mut kv);
        let record = store.get(&day("2026-10-18"));
        let texts: Vec<&str> = record.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert_eq!(record.completed[0].text, "C");
    }

    #[test]
    fn test_get_absent_is_empty_without_inserting() {
        let store = Store::default();
        assert!(store.get(&day("2026-10-18")).is_empty());
        assert!(!store.contains(&day("2026-10-18")));
    }

    #[test]
    fn test_ensure_inserts_once() {
        let mut store = Store::default();
        store.ensure(&day("2026-10-18")).tasks.push(Task::new("A"));
        store.ensure(&day("2026-10-18")).tasks.push(Task::new("B"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&day("2026-10-18")).tasks.len(), 2);
        assert!(store.has_tasks(&day("2026-10-18")));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let mut store = Store::default();
        {
            let record = store.ensure(&day("2026-10-18"));
            record.tasks.push(Task::new("A"));
            record.tasks.push(Task::new("B"));
            record.completed.push(Task::new("C"));
        }
        store.ensure(&day("2026-10-19"));

        let mut kv = MemoryStore::new();
        store.save(&mut kv).unwrap();
        let reloaded = Store::load(&mut kv);

        assert_eq!(reloaded, store);
    }

    #[test]
    fn test_wire_format() {
        let mut store = Store::default();
        store.ensure(&day("2026-10-18")).tasks.push(Task::new("A"));
        let mut kv = MemoryStore::new();
        store.save(&mut kv).unwrap();

        let value: serde_json::Value = serde_json::from_str(&kv.values[DATA_KEY]).unwrap();
        assert_eq!(value["2026-10-18"]["tasks"][0]["text"], "A");
        assert!(value["2026-10-18"]["completed"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_prune_empty() {
        let mut store = Store::default();
        store.ensure(&day("2026-10-17"));
        store.ensure(&day("2026-10-18")).completed.push(Task::new("done"));
        assert_eq!(store.prune_empty(), 1);
        assert!(!store.contains(&day("2026-10-17")));
        assert!(store.contains(&day("2026-10-18")));
        assert!(!store.has_tasks(&day("2026-10-18")));
    }
}
