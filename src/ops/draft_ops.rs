use std::fmt;

use indexmap::IndexMap;

use crate::model::draft::{DraftInput, Scope, TaskDraft};

/// Field-keyed validation failures, in form order.
///
/// Keys are the wire field names (`title`, `dueDateTime`, `teamId`) so the
/// caller can attach each message to the form field it belongs to. Every
/// failing field is collected in one pass; submission never fails fast on
/// the first problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: IndexMap<String, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate the raw editor fields and assemble the final submission draft.
///
/// On failure every failing field is reported at once. On success the
/// returned draft holds the invariants the store relies on: a Team draft
/// carries its team id, and a recurring draft's due date-time is its
/// recurrence start.
pub fn build_draft(input: DraftInput) -> Result<TaskDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = input.title.trim().to_string();
    if title.is_empty() {
        errors.add("title", "title is required");
    }

    // Recurring drafts take their due date-time from the recurrence start
    // (midnight of the start date); one-off drafts need an explicit one
    let due_date_time = match &input.recurrence {
        Some(recurrence) => recurrence.start_date.and_hms_opt(0, 0, 0),
        None => input.due_date_time,
    };
    if due_date_time.is_none() {
        errors.add("dueDateTime", "a due date is required");
    }

    let (team_id, assignee_id) = match input.scope {
        Scope::Team => {
            if input.team_id.is_none() {
                errors.add("teamId", "a team is required for team tasks");
            }
            (input.team_id.clone(), None)
        }
        // Personal tasks carry no team fields, whatever the editor held
        Scope::Personal => (None, input.assignee_id.clone()),
    };

    match due_date_time {
        Some(due_date_time) if errors.is_empty() => Ok(TaskDraft {
            title,
            description: input.description,
            notes: input.notes,
            due_date_time,
            is_recurring: input.recurrence.is_some(),
            recurrence: input.recurrence,
            reminder: input.reminder,
            scope: input.scope,
            team_id,
            assignee_id,
        }),
        _ => Err(errors),
    }
}
