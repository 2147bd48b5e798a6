use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The token used for `FREQ=` in the serialized rule grammar
    pub fn rule_token(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    /// Parse a `FREQ=` token into a frequency
    pub fn from_rule_token(token: &str) -> Option<Frequency> {
        match token {
            "DAILY" => Some(Frequency::Daily),
            "WEEKLY" => Some(Frequency::Weekly),
            "MONTHLY" => Some(Frequency::Monthly),
            "YEARLY" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}

/// Day of week. Variant order is the canonical rule order (Sun → Sat);
/// deriving `Ord` from it is what makes every weekday set serialize in the
/// same order no matter how the days were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    /// All days in canonical order
    pub const ALL: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Two-letter token used in `BYDAY=` lists
    pub fn rule_token(self) -> &'static str {
        match self {
            Weekday::Sun => "SU",
            Weekday::Mon => "MO",
            Weekday::Tue => "TU",
            Weekday::Wed => "WE",
            Weekday::Thu => "TH",
            Weekday::Fri => "FR",
            Weekday::Sat => "SA",
        }
    }

    /// Parse a `BYDAY=` token into a weekday
    pub fn from_rule_token(token: &str) -> Option<Weekday> {
        match token {
            "SU" => Some(Weekday::Sun),
            "MO" => Some(Weekday::Mon),
            "TU" => Some(Weekday::Tue),
            "WE" => Some(Weekday::Wed),
            "TH" => Some(Weekday::Thu),
            "FR" => Some(Weekday::Fri),
            "SA" => Some(Weekday::Sat),
            _ => None,
        }
    }
}

/// Whether a recurring series ends on a fixed date or runs indefinitely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Never,
    On(NaiveDate),
}

/// The editable recurrence definition.
///
/// Fields that are not relevant to the active `frequency` hold neutral
/// values; the compiler never reads them, so a stale selection from a
/// previous frequency cannot affect a compiled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    /// Every N units of the frequency (1 = every day/week/month/year)
    pub interval: u32,
    /// Date the series begins
    pub start_date: NaiveDate,
    pub termination: Termination,
    /// Weekly only; canonical sorted set
    pub weekly_days: BTreeSet<Weekday>,
    /// Monthly only; 1..=31
    pub month_day: u8,
    /// Yearly only; 1..=12
    pub year_month: u8,
    /// Yearly only; 1..=31
    pub year_day: u8,
}

impl RecurrencePattern {
    /// A pattern with neutral defaults for everything but frequency and start
    pub fn new(frequency: Frequency, start_date: NaiveDate) -> Self {
        RecurrencePattern {
            frequency,
            interval: 1,
            start_date,
            termination: Termination::Never,
            weekly_days: BTreeSet::new(),
            month_day: 1,
            year_month: 1,
            year_day: 1,
        }
    }
}

/// Error type for recurrence editing operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("interval must be at least 1")]
    IntervalTooSmall,
    #[error("day of month must be between 1 and 31, got {0}")]
    DayOutOfRange(u8),
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u8),
    #[error("end date {end} is before the series start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("weekly recurrence needs at least one weekday")]
    NoWeekdaysSelected,
}

/// Holds the one recurrence pattern under edit and keeps it structurally
/// coherent for its current frequency.
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    pattern: RecurrencePattern,
}

impl PatternBuilder {
    /// Start editing a fresh pattern
    pub fn new(frequency: Frequency, start_date: NaiveDate) -> Self {
        PatternBuilder {
            pattern: RecurrencePattern::new(frequency, start_date),
        }
    }

    /// Resume editing an existing pattern (the decompiled edit path)
    pub fn from_pattern(pattern: RecurrencePattern) -> Self {
        PatternBuilder { pattern }
    }

    /// The pattern as currently edited
    pub fn pattern(&self) -> &RecurrencePattern {
        &self.pattern
    }

    /// Switch frequency. Fields owned by the outgoing frequency are reset
    /// to neutral defaults so they cannot leak into a rule compiled for the
    /// new one.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        if self.pattern.frequency == frequency {
            return;
        }
        match self.pattern.frequency {
            Frequency::Daily => {}
            Frequency::Weekly => self.pattern.weekly_days.clear(),
            Frequency::Monthly => self.pattern.month_day = 1,
            Frequency::Yearly => {
                self.pattern.year_month = 1;
                self.pattern.year_day = 1;
            }
        }
        self.pattern.frequency = frequency;
    }

    pub fn set_interval(&mut self, interval: u32) -> Result<(), PatternError> {
        if interval < 1 {
            return Err(PatternError::IntervalTooSmall);
        }
        self.pattern.interval = interval;
        Ok(())
    }

    /// Add the day to the weekly set if absent, remove it if present
    pub fn toggle_weekday(&mut self, day: Weekday) {
        if !self.pattern.weekly_days.remove(&day) {
            self.pattern.weekly_days.insert(day);
        }
    }

    pub fn set_month_day(&mut self, day: u8) -> Result<(), PatternError> {
        if !(1..=31).contains(&day) {
            return Err(PatternError::DayOutOfRange(day));
        }
        self.pattern.month_day = day;
        Ok(())
    }

    pub fn set_year_month(&mut self, month: u8) -> Result<(), PatternError> {
        if !(1..=12).contains(&month) {
            return Err(PatternError::MonthOutOfRange(month));
        }
        self.pattern.year_month = month;
        Ok(())
    }

    /// Day-of-month for yearly recurrence. Range-checked only; whether the
    /// day exists in the chosen month is left to the occurrence generator.
    pub fn set_year_day(&mut self, day: u8) -> Result<(), PatternError> {
        if !(1..=31).contains(&day) {
            return Err(PatternError::DayOutOfRange(day));
        }
        self.pattern.year_day = day;
        Ok(())
    }

    pub fn set_termination(&mut self, termination: Termination) -> Result<(), PatternError> {
        if let Termination::On(end) = termination
            && end < self.pattern.start_date
        {
            return Err(PatternError::EndBeforeStart {
                start: self.pattern.start_date,
                end,
            });
        }
        self.pattern.termination = termination;
        Ok(())
    }

    /// Validated snapshot of the pattern, ready for the rule compiler
    pub fn build(&self) -> Result<RecurrencePattern, PatternError> {
        if self.pattern.frequency == Frequency::Weekly && self.pattern.weekly_days.is_empty() {
            return Err(PatternError::NoWeekdaysSelected);
        }
        Ok(self.pattern.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_weekday_adds_and_removes() {
        let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        builder.toggle_weekday(Weekday::Mon);
        builder.toggle_weekday(Weekday::Thu);
        assert!(builder.pattern().weekly_days.contains(&Weekday::Mon));
        builder.toggle_weekday(Weekday::Mon);
        assert!(!builder.pattern().weekly_days.contains(&Weekday::Mon));
    }

    #[test]
    fn test_weekday_set_iterates_in_canonical_order() {
        let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        // Click order: Fri, Mon, Wed
        builder.toggle_weekday(Weekday::Fri);
        builder.toggle_weekday(Weekday::Mon);
        builder.toggle_weekday(Weekday::Wed);
        let days: Vec<Weekday> = builder.pattern().weekly_days.iter().copied().collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
    }

    #[test]
    fn test_switching_frequency_resets_previous_fields() {
        let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        builder.toggle_weekday(Weekday::Mon);
        builder.set_frequency(Frequency::Monthly);
        assert!(builder.pattern().weekly_days.is_empty());

        builder.set_month_day(15).unwrap();
        builder.set_frequency(Frequency::Yearly);
        assert_eq!(builder.pattern().month_day, 1);

        builder.set_year_month(6).unwrap();
        builder.set_year_day(30).unwrap();
        builder.set_frequency(Frequency::Daily);
        assert_eq!(builder.pattern().year_month, 1);
        assert_eq!(builder.pattern().year_day, 1);
    }

    #[test]
    fn test_same_frequency_keeps_fields() {
        let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        builder.toggle_weekday(Weekday::Mon);
        builder.set_frequency(Frequency::Weekly);
        assert!(builder.pattern().weekly_days.contains(&Weekday::Mon));
    }

    #[test]
    fn test_termination_before_start_rejected() {
        let mut builder = PatternBuilder::new(Frequency::Daily, date(2025, 1, 6));
        let result = builder.set_termination(Termination::On(date(2025, 1, 5)));
        assert_eq!(
            result,
            Err(PatternError::EndBeforeStart {
                start: date(2025, 1, 6),
                end: date(2025, 1, 5),
            })
        );
        // Same-day termination is allowed
        builder
            .set_termination(Termination::On(date(2025, 1, 6)))
            .unwrap();
    }

    #[test]
    fn test_interval_zero_rejected() {
        let mut builder = PatternBuilder::new(Frequency::Daily, date(2025, 1, 6));
        assert_eq!(builder.set_interval(0), Err(PatternError::IntervalTooSmall));
        builder.set_interval(4).unwrap();
        assert_eq!(builder.pattern().interval, 4);
    }

    #[test]
    fn test_range_checks() {
        let mut builder = PatternBuilder::new(Frequency::Monthly, date(2025, 1, 6));
        assert_eq!(builder.set_month_day(0), Err(PatternError::DayOutOfRange(0)));
        assert_eq!(
            builder.set_month_day(32),
            Err(PatternError::DayOutOfRange(32))
        );
        builder.set_frequency(Frequency::Yearly);
        assert_eq!(
            builder.set_year_month(13),
            Err(PatternError::MonthOutOfRange(13))
        );
        // Feb 30 is accepted; the occurrence generator owns calendar validity
        builder.set_year_month(2).unwrap();
        builder.set_year_day(30).unwrap();
    }

    #[test]
    fn test_build_weekly_without_days_fails() {
        let builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        assert_eq!(builder.build(), Err(PatternError::NoWeekdaysSelected));
    }
}
