use crate::model::pattern::{Frequency, RecurrencePattern, Termination};

/// Error type for rule compilation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("weekly recurrence has no weekdays selected")]
    EmptyWeekdaySet,
}

/// Compile a pattern into its canonical rule string.
///
/// Key order is fixed: FREQ, INTERVAL, BYDAY, BYMONTHDAY, BYMONTH, UNTIL.
/// `INTERVAL` is omitted at 1, and weekdays always serialize in canonical
/// Sun→Sat order, so two builds of the same selection are byte-identical.
pub fn compile(pattern: &RecurrencePattern) -> Result<String, CompileError> {
    let mut rule = format!("FREQ={}", pattern.frequency.rule_token());

    if pattern.interval > 1 {
        rule.push_str(&format!(";INTERVAL={}", pattern.interval));
    }

    match pattern.frequency {
        Frequency::Daily => {}
        Frequency::Weekly => {
            if pattern.weekly_days.is_empty() {
                return Err(CompileError::EmptyWeekdaySet);
            }
            let days: Vec<&str> = pattern
                .weekly_days
                .iter()
                .map(|day| day.rule_token())
                .collect();
            rule.push_str(&format!(";BYDAY={}", days.join(",")));
        }
        Frequency::Monthly => {
            rule.push_str(&format!(";BYMONTHDAY={}", pattern.month_day));
        }
        Frequency::Yearly => {
            rule.push_str(&format!(";BYMONTHDAY={}", pattern.year_day));
            rule.push_str(&format!(";BYMONTH={}", pattern.year_month));
        }
    }

    // End-of-day of the civil termination date, floating local time
    if let Termination::On(end) = pattern.termination {
        rule.push_str(&format!(";UNTIL={}T235959Z", end.format("%Y%m%d")));
    }

    Ok(rule)
}
