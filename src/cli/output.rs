use serde::Serialize;

use crate::model::pattern::{Frequency, RecurrencePattern, Termination, Weekday};
use crate::model::task::TaskRecord;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson {
    pub view: String,
    pub scope: String,
    pub tasks: Vec<TaskRecord>,
}

#[derive(Serialize)]
pub struct TaskDetailJson {
    #[serde(flatten)]
    pub record: TaskRecord,
    /// Human reading of the recurrence rule, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<String>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

fn month_name(month: u8) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// Render a pattern the way the recurrence editor summarizes it:
/// `every 2 weeks on Mon, Thu until 2025-03-01`
pub fn describe_pattern(pattern: &RecurrencePattern) -> String {
    let unit = match pattern.frequency {
        Frequency::Daily => "day",
        Frequency::Weekly => "week",
        Frequency::Monthly => "month",
        Frequency::Yearly => "year",
    };
    let mut out = if pattern.interval == 1 {
        format!("every {}", unit)
    } else {
        format!("every {} {}s", pattern.interval, unit)
    };

    match pattern.frequency {
        Frequency::Daily => {}
        Frequency::Weekly => {
            let days: Vec<&str> = pattern
                .weekly_days
                .iter()
                .map(|day| weekday_name(*day))
                .collect();
            out.push_str(&format!(" on {}", days.join(", ")));
        }
        Frequency::Monthly => {
            out.push_str(&format!(" on day {}", pattern.month_day));
        }
        Frequency::Yearly => {
            out.push_str(&format!(
                " on {} {}",
                month_name(pattern.year_month),
                pattern.year_day
            ));
        }
    }

    if let Termination::On(end) = pattern.termination {
        out.push_str(&format!(" until {}", end));
    }

    out
}

/// One line per occurrence for `cad list`
pub fn task_line(record: &TaskRecord) -> String {
    let mut line = format!(
        "{:>4}  {}  {}",
        record.id,
        record.due_date_time.format("%Y-%m-%d %H:%M"),
        record.title
    );
    if record.is_recurring {
        line.push_str("  [recurring]");
    }
    if let Some(at) = record.reminder_at {
        line.push_str(&format!("  [remind {}]", at.format("%Y-%m-%d %H:%M")));
    }
    line
}
