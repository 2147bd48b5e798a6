use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::io::task_store::{RequestError, TaskPayload, TaskStore};
use crate::model::reminder::ReminderSpec;
use crate::model::task::TaskRecord;
use crate::ops::view_ops::QueryBounds;

/// On-disk shape of tasks.json
#[derive(Debug, Serialize, Deserialize)]
struct StoreData {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default = "first_id")]
    next_series_id: u64,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

fn first_id() -> u64 {
    1
}

impl StoreData {
    fn new() -> StoreData {
        StoreData {
            next_id: 1,
            next_series_id: 1,
            tasks: Vec::new(),
        }
    }
}

/// Task store backed by `tasks.json` in the planner directory.
///
/// Every mutation persists before returning, with a temp-file-then-rename
/// write so a crash cannot leave a half-written store behind.
pub struct JsonStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonStore {
    /// Open the store file inside the given planner directory
    pub fn open(planner_dir: &Path) -> Result<JsonStore, RequestError> {
        let path = planner_dir.join("tasks.json");
        let text = fs::read_to_string(&path)?;
        let data: StoreData = serde_json::from_str(&text)?;
        Ok(JsonStore { path, data })
    }

    /// Create an empty store file (used by `cad init`)
    pub fn create_empty(planner_dir: &Path) -> Result<JsonStore, RequestError> {
        let path = planner_dir.join("tasks.json");
        let store = JsonStore {
            path,
            data: StoreData::new(),
        };
        store.persist()?;
        Ok(store)
    }

    fn persist(&self) -> Result<(), RequestError> {
        let content = serde_json::to_string_pretty(&self.data)?;
        atomic_write(&self.path, content.as_bytes())?;
        Ok(())
    }

    fn position(&self, id: u64) -> Result<usize, RequestError> {
        self.data
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(RequestError::NotFound(id))
    }
}

/// Materialize the record the store hands back for a payload
fn record_from_payload(id: u64, series_id: Option<u64>, payload: TaskPayload) -> TaskRecord {
    TaskRecord {
        id,
        series_id,
        title: payload.title,
        description: payload.description,
        notes: payload.notes,
        due_date_time: payload.due_date_time,
        is_recurring: payload.is_recurring,
        recurrence_rule: payload.recurrence_rule,
        recurrence_start_date: payload.recurrence_start_date,
        recurrence_end_date: payload.recurrence_end_date,
        reminder_at: payload.reminder_at,
        reminder_channel: payload.reminder_channel,
        scope: payload.scope,
        team_id: payload.team_id,
        assign_to_id: payload.assign_to_id,
    }
}

impl TaskStore for JsonStore {
    fn create(&mut self, payload: TaskPayload) -> Result<TaskRecord, RequestError> {
        let id = self.data.next_id;
        self.data.next_id += 1;
        let series_id = if payload.is_recurring {
            let series = self.data.next_series_id;
            self.data.next_series_id += 1;
            Some(series)
        } else {
            None
        };
        let record = record_from_payload(id, series_id, payload);
        self.data.tasks.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn update(&mut self, id: u64, payload: TaskPayload) -> Result<TaskRecord, RequestError> {
        let pos = self.position(id)?;
        // Keep the existing series id; mint one if the task just became
        // recurring
        let series_id = match self.data.tasks[pos].series_id {
            Some(series) => Some(series),
            None if payload.is_recurring => {
                let series = self.data.next_series_id;
                self.data.next_series_id += 1;
                Some(series)
            }
            None => None,
        };
        let record = record_from_payload(id, series_id, payload);
        self.data.tasks[pos] = record.clone();
        self.persist()?;
        Ok(record)
    }

    fn delete(&mut self, id: u64) -> Result<(), RequestError> {
        let pos = self.position(id)?;
        self.data.tasks.remove(pos);
        self.persist()
    }

    fn add_reminder(
        &mut self,
        id: u64,
        reminder: &ReminderSpec,
    ) -> Result<TaskRecord, RequestError> {
        let pos = self.position(id)?;
        self.data.tasks[pos].reminder_at = Some(reminder.trigger_at);
        self.data.tasks[pos].reminder_channel = Some(reminder.channel.clone());
        let record = self.data.tasks[pos].clone();
        self.persist()?;
        Ok(record)
    }

    fn get(&self, id: u64) -> Result<TaskRecord, RequestError> {
        let pos = self.position(id)?;
        Ok(self.data.tasks[pos].clone())
    }

    fn list(&self, bounds: &QueryBounds) -> Result<Vec<TaskRecord>, RequestError> {
        Ok(self
            .data
            .tasks
            .iter()
            .filter(|record| matches_bounds(record, bounds))
            .cloned()
            .collect())
    }
}

/// Whether a record falls inside the query window and scope partition.
///
/// One-off tasks match on their due date. Recurring series match when
/// their [start, end] range intersects the window; expanding a series
/// into concrete occurrence dates is the backend generator's job, not
/// this client's.
fn matches_bounds(record: &TaskRecord, bounds: &QueryBounds) -> bool {
    if record.scope != bounds.scope {
        return false;
    }
    if record.is_recurring {
        let start = record
            .recurrence_start_date
            .unwrap_or_else(|| record.due_date_time.date());
        let starts_in_time = bounds.to.is_none_or(|to| start <= to);
        let still_running = bounds
            .from
            .is_none_or(|from| record.recurrence_end_date.is_none_or(|end| end >= from));
        starts_in_time && still_running
    } else {
        let due = record.due_date_time.date();
        bounds.from.is_none_or(|from| due >= from) && bounds.to.is_none_or(|to| due <= to)
    }
}

/// Write `content` to `path` atomically using a temp file + rename
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
