//! Round-trip law for the rule codec: decompiling a compiled pattern gives
//! back a semantically equal pattern, for every frequency.

use cadence::model::pattern::{Frequency, PatternBuilder, RecurrencePattern, Termination, Weekday};
use cadence::rule::{compile, decompile};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Helper: compile a pattern, decompile the result, and assert equality
fn assert_round_trip(pattern: RecurrencePattern) {
    let rule = compile(&pattern).unwrap();
    let back = decompile(&rule, pattern.start_date)
        .unwrap_or_else(|e| panic!("could not decompile {}: {}", rule, e));
    assert_eq!(back, pattern, "round-trip failed for rule: {}", rule);
}

// ============================================================================
// Round-trip law, all four frequencies
// ============================================================================

#[test]
fn round_trip_daily() {
    let mut builder = PatternBuilder::new(Frequency::Daily, date(2025, 1, 6));
    builder.set_interval(3).unwrap();
    assert_round_trip(builder.build().unwrap());
}

#[test]
fn round_trip_weekly() {
    let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
    builder.set_interval(2).unwrap();
    builder.toggle_weekday(Weekday::Mon);
    builder.toggle_weekday(Weekday::Thu);
    builder
        .set_termination(Termination::On(date(2025, 3, 1)))
        .unwrap();
    assert_round_trip(builder.build().unwrap());
}

#[test]
fn round_trip_monthly() {
    let mut builder = PatternBuilder::new(Frequency::Monthly, date(2025, 1, 31));
    builder.set_month_day(31).unwrap();
    assert_round_trip(builder.build().unwrap());
}

#[test]
fn round_trip_yearly() {
    let mut builder = PatternBuilder::new(Frequency::Yearly, date(2025, 1, 6));
    builder.set_year_month(2).unwrap();
    builder.set_year_day(29).unwrap();
    builder
        .set_termination(Termination::On(date(2032, 12, 31)))
        .unwrap();
    assert_round_trip(builder.build().unwrap());
}

#[test]
fn round_trip_every_single_weekday() {
    for day in Weekday::ALL {
        let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        builder.toggle_weekday(day);
        assert_round_trip(builder.build().unwrap());
    }
}

#[test]
fn round_trip_full_weekday_set() {
    let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
    for day in Weekday::ALL {
        builder.toggle_weekday(day);
    }
    let pattern = builder.build().unwrap();
    let rule = compile(&pattern).unwrap();
    assert_eq!(rule, "FREQ=WEEKLY;BYDAY=SU,MO,TU,WE,TH,FR,SA");
    assert_round_trip(pattern);
}

// ============================================================================
// Exact serialized forms
// ============================================================================

#[test]
fn weekly_scenario_compiles_exactly() {
    let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
    builder.set_interval(2).unwrap();
    builder.toggle_weekday(Weekday::Mon);
    builder.toggle_weekday(Weekday::Thu);
    builder
        .set_termination(Termination::On(date(2025, 3, 1)))
        .unwrap();
    assert_eq!(
        compile(&builder.build().unwrap()).unwrap(),
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH;UNTIL=20250301T235959Z"
    );
}

#[test]
fn plain_daily_compiles_to_freq_only() {
    let builder = PatternBuilder::new(Frequency::Daily, date(2025, 1, 6));
    assert_eq!(compile(&builder.build().unwrap()).unwrap(), "FREQ=DAILY");
}

#[test]
fn selection_order_never_changes_output() {
    let click_orders: [&[Weekday]; 3] = [
        &[Weekday::Fri, Weekday::Mon, Weekday::Wed],
        &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
        &[Weekday::Wed, Weekday::Fri, Weekday::Mon],
    ];
    let mut rules = Vec::new();
    for order in click_orders {
        let mut builder = PatternBuilder::new(Frequency::Weekly, date(2025, 1, 6));
        for day in order {
            builder.toggle_weekday(*day);
        }
        rules.push(compile(&builder.build().unwrap()).unwrap());
    }
    assert_eq!(rules[0], "FREQ=WEEKLY;BYDAY=MO,WE,FR");
    assert_eq!(rules[0], rules[1]);
    assert_eq!(rules[1], rules[2]);
}

#[test]
fn compile_always_starts_with_freq() {
    let mut builder = PatternBuilder::new(Frequency::Yearly, date(2025, 1, 6));
    builder.set_interval(5).unwrap();
    builder.set_year_month(12).unwrap();
    builder.set_year_day(25).unwrap();
    let rule = compile(&builder.build().unwrap()).unwrap();
    assert!(rule.starts_with("FREQ="));
    assert!(rule.contains("INTERVAL=5"));
}

// ============================================================================
// Decompile tolerance
// ============================================================================

#[test]
fn decompile_accepts_shuffled_tokens() {
    let start = date(2025, 1, 6);
    let canonical = decompile(
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH;UNTIL=20250301T235959Z",
        start,
    )
    .unwrap();
    let shuffled = decompile(
        "BYDAY=MO,TH;UNTIL=20250301T235959Z;FREQ=WEEKLY;INTERVAL=2",
        start,
    )
    .unwrap();
    assert_eq!(canonical, shuffled);
}

#[test]
fn decompile_then_compile_is_canonical() {
    // A shuffled but valid rule recompiles to the canonical form
    let start = date(2025, 1, 6);
    let pattern = decompile("UNTIL=20250301T235959Z;FREQ=WEEKLY;BYDAY=TH,MO", start).unwrap();
    assert_eq!(
        compile(&pattern).unwrap(),
        "FREQ=WEEKLY;BYDAY=MO,TH;UNTIL=20250301T235959Z"
    );
}
