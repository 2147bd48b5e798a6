use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::reminder::ReminderSpec;

/// Whether a task belongs to one person or to a whole team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Personal,
    Team,
}

impl Scope {
    /// Parse a CLI token
    pub fn from_token(token: &str) -> Option<Scope> {
        match token {
            "personal" => Some(Scope::Personal),
            "team" => Some(Scope::Team),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Personal => "Personal",
            Scope::Team => "Team",
        }
    }
}

/// A compiled recurrence attached to a draft: the opaque rule string plus
/// the series window the editor collected alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceDraft {
    /// Compiled rule string; only the rule codec ever looks inside
    pub rule: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Raw editor fields, as collected before validation
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub due_date_time: Option<NaiveDateTime>,
    pub recurrence: Option<RecurrenceDraft>,
    pub reminder: Option<ReminderSpec>,
    pub scope: Scope,
    pub team_id: Option<String>,
    pub assignee_id: Option<String>,
}

/// A validated, ready-to-submit task.
///
/// Only `ops::draft_ops::build_draft` constructs one, which is what keeps
/// the invariants true: a Team draft always carries a team id, and a
/// recurring draft's due date-time always equals its recurrence start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub due_date_time: NaiveDateTime,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrenceDraft>,
    pub reminder: Option<ReminderSpec>,
    pub scope: Scope,
    pub team_id: Option<String>,
    pub assignee_id: Option<String>,
}
