use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Quick-pick reminder offsets offered by the task editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPreset {
    Tomorrow,
    NextWeek,
    Someday,
}

impl ReminderPreset {
    /// Label shown in place of the raw timestamp
    pub fn label(self) -> &'static str {
        match self {
            ReminderPreset::Tomorrow => "Tomorrow",
            ReminderPreset::NextWeek => "Next week",
            ReminderPreset::Someday => "Someday",
        }
    }

    /// Parse a CLI token like `tomorrow` or `next-week`
    pub fn from_token(token: &str) -> Option<ReminderPreset> {
        match token {
            "tomorrow" => Some(ReminderPreset::Tomorrow),
            "next-week" => Some(ReminderPreset::NextWeek),
            "someday" => Some(ReminderPreset::Someday),
            _ => None,
        }
    }
}

/// A resolved reminder: the absolute instant it fires, the delivery channel,
/// and the preset label (if one was used) so the editor can redisplay
/// "Tomorrow" instead of a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSpec {
    pub trigger_at: NaiveDateTime,
    pub channel: String,
    pub preset_label: Option<String>,
}
