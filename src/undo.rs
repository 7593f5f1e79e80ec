use crate::domain::UndoEntry;
use crate::persistence::KeyValueStore;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Storage key holding the pending undo entry
pub const UNDO_KEY: &str = "taskCheckerUndo";

/// How long an undo entry stays available
pub const DEFAULT_UNDO_TIMEOUT: Duration = Duration::from_secs(5);

/// Persisted form of the pending entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PendingUndo {
    #[serde(flatten)]
    entry: UndoEntry,
    #[serde(default = "Local::now")]
    recorded_at: DateTime<Local>,
}

/// Deadline `timeout` from now; `None` when it cannot be represented, which
/// leaves the entry pending until it is used, dismissed or replaced
fn deadline_after(timeout: Duration) -> Option<Instant> {
    let deadline = Instant::now().checked_add(timeout);
    if deadline.is_none() {
        warn!("Undo timeout {:?} is too large, entry will not expire", timeout);
    }
    deadline
}

/// Holds at most one reversible action and the deadline after which it lapses.
///
/// Every entry point that changes the entry also replaces or drops the
/// deadline, so a stale expiry can never clear a newer entry.
#[derive(Debug)]
pub struct UndoBuffer {
    pending: Option<PendingUndo>,
    deadline: Option<Instant>,
    timeout: Duration,
}

impl UndoBuffer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            pending: None,
            deadline: None,
            timeout,
        }
    }

    /// Restore a persisted entry, honoring whatever is left of its window
    pub fn load(kv: &mut dyn KeyValueStore, timeout: Duration) -> Self {
        let mut buffer = Self::new(timeout);

        let raw = match kv.get(UNDO_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return buffer,
            Err(e) => {
                warn!("Could not read pending undo: {}", e);
                return buffer;
            }
        };

        let pending: PendingUndo = match serde_json::from_str(&raw) {
            Ok(pending) => pending,
            Err(e) => {
                warn!("Discarding malformed undo entry: {}", e);
                buffer.clear(kv);
                return buffer;
            }
        };

        // A timestamp in the future counts as just recorded
        let elapsed = (Local::now() - pending.recorded_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        match timeout.checked_sub(elapsed) {
            Some(remaining) if !remaining.is_zero() => {
                buffer.deadline = deadline_after(remaining);
                buffer.pending = Some(pending);
            }
            _ => {
                debug!("Pending undo expired while closed");
                buffer.clear(kv);
            }
        }

        buffer
    }

    /// Replace any pending entry and restart the expiry window
    pub fn set(&mut self, entry: UndoEntry, kv: &mut dyn KeyValueStore) {
        let pending = PendingUndo {
            entry,
            recorded_at: Local::now(),
        };

        match serde_json::to_string(&pending) {
            Ok(json) => {
                if let Err(e) = kv.set(UNDO_KEY, &json) {
                    warn!("Could not persist undo entry: {}", e);
                }
            }
            Err(e) => warn!("Could not encode undo entry: {}", e),
        }

        debug!("Undo available: {}", pending.entry.kind().name());
        self.deadline = deadline_after(self.timeout);
        self.pending = Some(pending);
    }

    /// Drop the pending entry; returns whether there was one
    pub fn clear(&mut self, kv: &mut dyn KeyValueStore) -> bool {
        self.deadline = None;
        if let Err(e) = kv.remove(UNDO_KEY) {
            warn!("Could not remove persisted undo entry: {}", e);
        }
        self.pending.take().is_some()
    }

    pub fn current(&self) -> Option<&UndoEntry> {
        self.pending.as_ref().map(|p| &p.entry)
    }

    /// Run the reversal for the pending entry, then clear the buffer.
    ///
    /// Returns what `reverse` returned, or `false` when nothing was pending.
    pub fn apply<F>(&mut self, kv: &mut dyn KeyValueStore, reverse: F) -> bool
    where
        F: FnOnce(&UndoEntry) -> bool,
    {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };
        let applied = reverse(&pending.entry);
        self.clear(kv);
        applied
    }

    /// Clear the entry once its deadline has passed
    pub fn expire_due(&mut self, now: Instant, kv: &mut dyn KeyValueStore) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                debug!("Undo window closed");
                self.clear(kv)
            }
            _ => false,
        }
    }

    /// Time left before the pending entry lapses
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref()?;
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}
