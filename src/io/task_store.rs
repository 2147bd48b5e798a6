use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::draft::{Scope, TaskDraft};
use crate::model::reminder::ReminderSpec;
use crate::model::task::TaskRecord;
use crate::ops::view_ops::QueryBounds;

/// Failure reported by the task store collaborator.
///
/// Never retried automatically. A failed submission leaves the caller's
/// draft intact, so retrying is always a deliberate resubmission.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("task not found: {0}")]
    NotFound(u64),
    #[error("could not reach the task store: {0}")]
    Transport(#[from] std::io::Error),
    #[error("store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The submission payload, exactly as the store's create and update
/// endpoints consume it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub due_date_time: NaiveDateTime,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_channel: Option<String>,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign_to_id: Option<String>,
}

impl TaskPayload {
    /// Flatten a validated draft into the wire shape
    pub fn from_draft(draft: &TaskDraft) -> TaskPayload {
        TaskPayload {
            title: draft.title.clone(),
            description: draft.description.clone(),
            notes: draft.notes.clone(),
            due_date_time: draft.due_date_time,
            is_recurring: draft.is_recurring,
            recurrence_rule: draft.recurrence.as_ref().map(|r| r.rule.clone()),
            recurrence_start_date: draft.recurrence.as_ref().map(|r| r.start_date),
            recurrence_end_date: draft.recurrence.as_ref().and_then(|r| r.end_date),
            reminder_at: draft.reminder.as_ref().map(|r| r.trigger_at),
            reminder_channel: draft.reminder.as_ref().map(|r| r.channel.clone()),
            scope: draft.scope,
            team_id: draft.team_id.clone(),
            assign_to_id: draft.assignee_id.clone(),
        }
    }
}

/// The external task store boundary.
///
/// The recurrence rule string passes through unmodified in both directions;
/// the store never interprets it. Occurrence and series identifiers are
/// minted on the store side and treated as opaque here.
pub trait TaskStore {
    fn create(&mut self, payload: TaskPayload) -> Result<TaskRecord, RequestError>;
    fn update(&mut self, id: u64, payload: TaskPayload) -> Result<TaskRecord, RequestError>;
    fn delete(&mut self, id: u64) -> Result<(), RequestError>;
    fn add_reminder(
        &mut self,
        id: u64,
        reminder: &ReminderSpec,
    ) -> Result<TaskRecord, RequestError>;
    fn get(&self, id: u64) -> Result<TaskRecord, RequestError>;
    fn list(&self, bounds: &QueryBounds) -> Result<Vec<TaskRecord>, RequestError>;
}
