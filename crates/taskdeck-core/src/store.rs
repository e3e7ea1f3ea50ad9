use std::collections::BTreeSet;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;
use crate::task::{Task, TaskDraft, TaskId, TaskPatch};

/// Owns the canonical task list and mirrors it, whole, into a key-value backend.
#[derive(Debug)]
pub struct TaskStore<S> {
    backend: S,
    key: String,
    tasks: Vec<Task>,
    /// `None` once the counter has passed `u64::MAX`; ids then come from the
    /// lowest unused value.
    next_id: Option<u64>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Rehydrates from `key`. Missing or unreadable data yields an empty list.
    #[tracing::instrument(skip(backend))]
    pub fn load(backend: S, key: &str) -> Self {
        let tasks = match backend.get(key) {
            Ok(Some(raw)) => decode_tasks(&raw),
            Ok(None) => {
                debug!("no stored tasks; starting empty");
                vec![]
            }
            Err(err) => {
                warn!(error = %err, "failed reading stored tasks; starting empty");
                vec![]
            }
        };

        let next_id = next_id(&tasks);
        if next_id.is_none() {
            warn!("stored ids reach u64::MAX; new ids will fill gaps");
        }
        info!(count = tasks.len(), ?next_id, "loaded task store");

        Self {
            backend,
            key: key.to_string(),
            tasks,
            next_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Returns `Ok(None)` without writing when the trimmed title is empty.
    #[tracing::instrument(skip(self, draft), fields(title_len = draft.title.len()))]
    pub fn add(&mut self, draft: &TaskDraft, now: DateTime<Utc>) -> anyhow::Result<Option<TaskId>> {
        let id = self.allocate_id()?;
        let Some(task) = Task::from_draft(id, draft, now) else {
            debug!("rejected task with blank title");
            return Ok(None);
        };

        self.next_id = self.next_id.and_then(|n| n.checked_add(1));
        self.tasks.push(task);
        info!(%id, "added task");
        self.persist()?;
        Ok(Some(id))
    }

    /// Returns whether a task matched.
    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> anyhow::Result<bool> {
        let found = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.apply_patch(patch);
                debug!("task patch applied");
                true
            }
            None => {
                debug!("update for unknown task ignored");
                false
            }
        };
        self.persist()?;
        Ok(found)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn toggle_complete(&mut self, id: TaskId) -> anyhow::Result<bool> {
        let found = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(completed = task.completed, "toggled task");
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(found)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&mut self, id: TaskId) -> anyhow::Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            info!("deleted task");
        }
        self.persist()?;
        Ok(removed)
    }

    fn allocate_id(&self) -> anyhow::Result<TaskId> {
        if let Some(n) = self.next_id {
            return Ok(TaskId(n));
        }
        let used: BTreeSet<u64> = self.tasks.iter().map(|task| task.id.0).collect();
        (1..=u64::MAX)
            .find(|n| !used.contains(n))
            .map(TaskId)
            .context("task id space exhausted")
    }

    /// Serializes the whole list and overwrites the stored value.
    #[tracing::instrument(skip(self), fields(key = %self.key, count = self.tasks.len()))]
    pub fn persist(&mut self) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&self.tasks).context("failed to serialize tasks")?;
        self.backend
            .set(&self.key, &payload)
            .with_context(|| format!("failed to write tasks to {}", self.key))?;
        debug!(bytes = payload.len(), "persisted tasks");
        Ok(())
    }
}

/// Decodes a stored list record by record. A payload that is not a JSON array
/// yields nothing; records that do not decode are dropped.
fn decode_tasks(raw: &str) -> Vec<Task> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(err) => {
            warn!(error = %err, "stored tasks are not a JSON array; starting empty");
            return vec![];
        }
    };

    let mut out = Vec::with_capacity(values.len());
    let mut seen = BTreeSet::new();
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Task>(value) {
            Ok(task) if seen.insert(task.id) => out.push(task),
            Ok(task) => warn!(index = idx, id = %task.id, "skipping task with duplicate id"),
            Err(err) => warn!(index = idx, error = %err, "skipping unreadable task"),
        }
    }
    out
}

fn next_id(tasks: &[Task]) -> Option<u64> {
    tasks.iter().map(|t| t.id.0).max().unwrap_or(0).checked_add(1)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::storage::MemoryStore;
    use crate::task::{Category, Priority};

    const KEY: &str = "todo-tasks";

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("storage disabled"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn add_assigns_increasing_ids_and_persists() {
        let mut store = TaskStore::load(MemoryStore::new(), KEY);

        let a = store.add(&draft("Buy milk"), at(0)).expect("add").expect("id");
        let b = store.add(&draft("Call mom"), at(0)).expect("add").expect("id");
        assert_ne!(a, b);
        assert!(b > a);

        let raw = store.backend().raw(KEY).expect("written");
        let decoded: Vec<Task> = serde_json::from_str(raw).expect("decode");
        assert_eq!(decoded, store.tasks());
    }

    #[test]
    fn blank_title_does_not_write() {
        let mut store = TaskStore::load(MemoryStore::new(), KEY);
        let added = store.add(&draft("   "), at(0)).expect("add");
        assert_eq!(added, None);
        assert!(store.tasks().is_empty());
        assert!(store.backend().raw(KEY).is_none());
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut store = TaskStore::load(MemoryStore::new(), KEY);
        store.add(&draft("Buy milk"), at(0)).expect("add");
        let before = store.tasks().to_vec();

        assert!(!store.toggle_complete(TaskId(999)).expect("toggle"));
        assert!(!store.delete(TaskId(999)).expect("delete"));
        assert!(!store
            .update(TaskId(999), TaskDraft::default().into_patch())
            .expect("update"));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn unparsable_payload_loads_empty() {
        let backend = MemoryStore::with_entry(KEY, "{not json");
        let store = TaskStore::load(backend, KEY);
        assert!(store.tasks().is_empty());

        let store = TaskStore::load(FailingStore, KEY);
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn bad_records_are_skipped_and_ids_continue_above_legacy_values() {
        let raw = r#"[
            {"id": 1717171717171, "title": "Legacy", "description": "",
             "category": "Work", "priority": "High", "dueDate": "2024-06-01",
             "completed": true, "createdAt": "2024-05-31T16:08:37.171Z"},
            {"id": 5, "title": "Odd", "category": "Errands", "priority": "Low",
             "createdAt": "2024-05-31T16:08:37.171Z"}
        ]"#;
        let mut store = TaskStore::load(MemoryStore::with_entry(KEY, raw), KEY);
        assert_eq!(store.tasks().len(), 1);
        let legacy = &store.tasks()[0];
        assert_eq!(legacy.category, Category::Work);
        assert_eq!(legacy.priority, Priority::High);
        assert_eq!(legacy.due_date, NaiveDate::from_ymd_opt(2024, 6, 1));

        let id = store.add(&draft("Fresh"), at(1)).expect("add").expect("id");
        assert_eq!(id, TaskId(1_717_171_717_172));
    }

    #[test]
    fn max_stored_id_does_not_wrap_into_existing_ids() {
        let raw = r#"[
            {"id": 1, "title": "First", "category": "Personal", "priority": "Low",
             "createdAt": "2024-05-31T16:08:37.171Z"},
            {"id": 18446744073709551615, "title": "Last", "category": "Work",
             "priority": "High", "createdAt": "2024-05-31T16:08:37.171Z"}
        ]"#;
        let mut store = TaskStore::load(MemoryStore::with_entry(KEY, raw), KEY);
        assert_eq!(store.tasks().len(), 2);

        let a = store.add(&draft("Second"), at(1)).expect("add").expect("id");
        let b = store.add(&draft("Third"), at(2)).expect("add").expect("id");
        assert_eq!((a, b), (TaskId(2), TaskId(3)));

        let ids: BTreeSet<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), store.tasks().len());
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let mut store = TaskStore::load(FailingStore, KEY);
        let result = store.add(&draft("Buy milk"), at(0));
        assert!(result.is_err());
        assert_eq!(store.tasks().len(), 1);
    }
}
