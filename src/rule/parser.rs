use chrono::NaiveDate;

use crate::model::pattern::{Frequency, RecurrencePattern, Termination, Weekday};

/// Error type for rule decompilation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("rule has no FREQ token")]
    MissingFrequency,
    #[error("unknown frequency: {0}")]
    UnknownFrequency(String),
    #[error("unknown rule key: {0}")]
    UnknownKey(String),
    #[error("malformed rule token: {0}")]
    MalformedToken(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

fn invalid(key: &str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Decompile a stored rule string back into an editable pattern.
///
/// Tokens are accepted in any order, not just the order the compiler
/// emits. Absent optional keys fall back to their neutral defaults:
/// `INTERVAL` to 1, `BYDAY` to the empty set, no `UNTIL` to `Never`.
/// `start_date` comes from the stored record; the rule itself does not
/// carry it.
pub fn decompile(rule: &str, start_date: NaiveDate) -> Result<RecurrencePattern, ParseError> {
    let mut frequency = None;
    let mut interval = 1u32;
    let mut by_day = Vec::new();
    let mut by_month_day = None;
    let mut by_month = None;
    let mut until = None;

    for token in rule.split(';') {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| ParseError::MalformedToken(token.to_string()))?;
        match key {
            "FREQ" => {
                frequency = Some(
                    Frequency::from_rule_token(value)
                        .ok_or_else(|| ParseError::UnknownFrequency(value.to_string()))?,
                );
            }
            "INTERVAL" => {
                interval = value
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| invalid(key, value))?;
            }
            "BYDAY" => {
                for day_token in value.split(',') {
                    let day = Weekday::from_rule_token(day_token)
                        .ok_or_else(|| invalid(key, day_token))?;
                    by_day.push(day);
                }
            }
            "BYMONTHDAY" => {
                by_month_day = Some(
                    value
                        .parse::<u8>()
                        .ok()
                        .filter(|d| (1..=31).contains(d))
                        .ok_or_else(|| invalid(key, value))?,
                );
            }
            "BYMONTH" => {
                by_month = Some(
                    value
                        .parse::<u8>()
                        .ok()
                        .filter(|m| (1..=12).contains(m))
                        .ok_or_else(|| invalid(key, value))?,
                );
            }
            "UNTIL" => {
                until = Some(parse_until(value)?);
            }
            // The store never rewrites a rule, so an unrecognized key
            // means the string did not come from this compiler
            _ => return Err(ParseError::UnknownKey(key.to_string())),
        }
    }

    let frequency = frequency.ok_or(ParseError::MissingFrequency)?;

    // Assemble from neutral defaults, taking only the fields the parsed
    // frequency owns; anything else present in the input is dropped
    let mut pattern = RecurrencePattern::new(frequency, start_date);
    pattern.interval = interval;
    match frequency {
        Frequency::Daily => {}
        Frequency::Weekly => {
            pattern.weekly_days = by_day.into_iter().collect();
        }
        Frequency::Monthly => {
            if let Some(day) = by_month_day {
                pattern.month_day = day;
            }
        }
        Frequency::Yearly => {
            if let Some(day) = by_month_day {
                pattern.year_day = day;
            }
            if let Some(month) = by_month {
                pattern.year_month = month;
            }
        }
    }
    if let Some(end) = until {
        pattern.termination = Termination::On(end);
    }

    Ok(pattern)
}

/// Parse an `UNTIL=` value: `YYYYMMDD`, optionally followed by a
/// `T<hhmmss>Z` time the compiler always writes as end-of-day.
fn parse_until(value: &str) -> Result<NaiveDate, ParseError> {
    let date_part = match value.split_once('T') {
        Some((date_part, _time_part)) => date_part,
        None => value,
    };
    NaiveDate::parse_from_str(date_part, "%Y%m%d").map_err(|_| invalid("UNTIL", value))
}
