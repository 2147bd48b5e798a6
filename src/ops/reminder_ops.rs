use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::reminder::{ReminderPreset, ReminderSpec};

/// Resolve a quick-pick preset into an absolute trigger instant.
///
/// Offsets are whole days from `now`, so the time-of-day is preserved:
/// "tomorrow" at 09:00 fires at 09:00 tomorrow.
pub fn resolve_preset(preset: ReminderPreset, now: NaiveDateTime, channel: &str) -> ReminderSpec {
    let trigger_at = match preset {
        ReminderPreset::Tomorrow => now + Duration::days(1),
        ReminderPreset::NextWeek => now + Duration::days(7),
        // TODO: product still owes Someday a real offset; it tracks
        // NextWeek until then
        ReminderPreset::Someday => now + Duration::days(7),
    };
    ReminderSpec {
        trigger_at,
        channel: channel.to_string(),
        preset_label: Some(preset.label().to_string()),
    }
}

/// Resolve an explicit date and time, verbatim
pub fn resolve_explicit(date: NaiveDate, time: NaiveTime, channel: &str) -> ReminderSpec {
    ReminderSpec {
        trigger_at: date.and_time(time),
        channel: channel.to_string(),
        preset_label: None,
    }
}
