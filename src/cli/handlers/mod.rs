mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Global override for the planner directory (set by -C flag)
static PLANNER_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::{ListJson, TaskDetailJson, describe_pattern, task_line};
use crate::io::config_io::{self, PlannerError};
use crate::io::json_store::JsonStore;
use crate::io::task_store::{TaskPayload, TaskStore};
use crate::model::config::PlannerConfig;
use crate::model::draft::{DraftInput, RecurrenceDraft, Scope};
use crate::model::pattern::{Frequency, PatternBuilder, RecurrencePattern, Termination, Weekday};
use crate::model::reminder::{ReminderPreset, ReminderSpec};
use crate::model::task::TaskRecord;
use crate::ops::draft_ops::build_draft;
use crate::ops::reminder_ops::{resolve_explicit, resolve_preset};
use crate::ops::search::filter_by_title;
use crate::ops::view_ops::{ViewWindow, resolve_bounds};
use crate::rule;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_planner_cwd()
    if let Some(ref dir) = cli.dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        PLANNER_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // Init is handled before planner discovery
        Commands::Init(args) => cmd_init(args),

        Commands::Add(args) => cmd_add(args, json),
        Commands::List(args) => cmd_list(args, json),
        Commands::Show(args) => cmd_show(args, json),
        Commands::Edit(args) => cmd_edit(args, json),
        Commands::Remind(args) => cmd_remind(args, json),
        Commands::Delete(args) => cmd_delete(args),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mut store) = load_planner_cwd()?;
    let today = Local::now().date_naive();

    let pattern = resolve_pattern(None, &args.recurrence, today)?;
    let recurrence = match &pattern {
        Some(pattern) => Some(compile_recurrence(pattern)?),
        None => None,
    };

    let reminder = match &args.remind {
        Some(token) => Some(parse_reminder(
            token,
            args.channel.as_deref().unwrap_or(&config.reminders.default_channel),
        )?),
        None => None,
    };

    let scope = if args.team.is_some() {
        Scope::Team
    } else {
        Scope::Personal
    };

    let input = DraftInput {
        title: args.title,
        description: args.desc,
        notes: args.notes,
        due_date_time: args.due.as_deref().map(parse_datetime).transpose()?,
        recurrence,
        reminder,
        scope,
        team_id: args.team,
        assignee_id: args.assignee,
    };

    let draft = build_draft(input)?;
    let record = store.create(TaskPayload::from_draft(&draft))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        match &pattern {
            Some(pattern) => println!(
                "Added task {} ({})",
                record.id,
                describe_pattern(pattern)
            ),
            None => println!("Added task {}", record.id),
        }
    }
    Ok(())
}

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = load_planner_cwd()?;

    let view = ViewWindow::from_token(&args.view)
        .ok_or_else(|| format!("unknown view: {} (today | week | all)", args.view))?;
    let scope = Scope::from_token(&args.scope)
        .ok_or_else(|| format!("unknown scope: {} (personal | team)", args.scope))?;

    let today = Local::now().date_naive();
    let bounds = resolve_bounds(view, scope, today, config.views.week_start);
    let mut records = store.list(&bounds)?;
    records.sort_by_key(|record| record.due_date_time);

    let records: Vec<TaskRecord> = if let Some(pattern) = &args.pattern {
        let re = Regex::new(pattern)?;
        filter_by_title(&records, &re).into_iter().cloned().collect()
    } else {
        records
    };

    if json {
        let out = ListJson {
            view: args.view,
            scope: scope.as_str().to_string(),
            tasks: records,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if records.is_empty() {
        println!("No tasks.");
    } else {
        for record in &records {
            println!("{}", task_line(record));
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store) = load_planner_cwd()?;
    let record = store.get(args.id)?;
    let pattern = stored_pattern(&record)?;
    let repeats = pattern.as_ref().map(describe_pattern);

    if json {
        let out = TaskDetailJson { record, repeats };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", task_line(&record));
    if let Some(description) = &record.description {
        println!("  description: {}", description);
    }
    if let Some(notes) = &record.notes {
        println!("  notes: {}", notes);
    }
    if let Some(repeats) = &repeats {
        println!("  repeats: {}", repeats);
        if let Some(rule) = &record.recurrence_rule {
            println!("  rule: {}", rule);
        }
    }
    if let Some(at) = record.reminder_at {
        let channel = record.reminder_channel.as_deref().unwrap_or("notification");
        println!("  reminder: {} via {}", at.format("%Y-%m-%d %H:%M"), channel);
    }
    println!("  scope: {}", record.scope.as_str());
    if let Some(team) = &record.team_id {
        println!("  team: {}", team);
    }
    if let Some(assignee) = &record.assign_to_id {
        println!("  assignee: {}", assignee);
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, mut store) = load_planner_cwd()?;
    let record = store.get(args.id)?;
    let today = Local::now().date_naive();

    // Prefill the builder from the stored rule, then layer the flags on top
    let existing = stored_pattern(&record)?;
    let pattern = resolve_pattern(existing, &args.recurrence, today)?;
    let recurrence = match &pattern {
        Some(pattern) => Some(compile_recurrence(pattern)?),
        None => None,
    };

    let reminder = match (record.reminder_at, &record.reminder_channel) {
        (Some(trigger_at), Some(channel)) => Some(ReminderSpec {
            trigger_at,
            channel: channel.clone(),
            preset_label: None,
        }),
        _ => None,
    };

    let input = DraftInput {
        title: args.title.unwrap_or_else(|| record.title.clone()),
        description: record.description.clone(),
        notes: record.notes.clone(),
        due_date_time: Some(record.due_date_time),
        recurrence,
        reminder,
        scope: record.scope,
        team_id: record.team_id.clone(),
        assignee_id: record.assign_to_id.clone(),
    };

    let draft = build_draft(input)?;
    let updated = store.update(args.id, TaskPayload::from_draft(&draft))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Updated task {}", updated.id);
    }
    Ok(())
}

fn cmd_remind(args: RemindArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mut store) = load_planner_cwd()?;
    let spec = parse_reminder(
        &args.when,
        args.channel.as_deref().unwrap_or(&config.reminders.default_channel),
    )?;
    let record = store.add_reminder(args.id, &spec)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        match &spec.preset_label {
            Some(label) => println!(
                "Reminder for task {} set to {} ({})",
                record.id,
                label,
                spec.trigger_at.format("%Y-%m-%d %H:%M")
            ),
            None => println!(
                "Reminder for task {} set to {}",
                record.id,
                spec.trigger_at.format("%Y-%m-%d %H:%M")
            ),
        }
    }
    Ok(())
}

fn cmd_delete(args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, mut store) = load_planner_cwd()?;
    store.delete(args.id)?;
    println!("Deleted task {}", args.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_planner_cwd() -> Result<(PlannerConfig, JsonStore), Box<dyn std::error::Error>> {
    let start = match PLANNER_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(PlannerError::IoError)?,
    };
    let planner_dir = config_io::discover_planner(&start)?;
    let config = config_io::read_config(&planner_dir)?;
    let store = JsonStore::open(&planner_dir)?;
    Ok((config, store))
}

/// Build the pattern for `add` (no base) or `edit` (base decompiled from
/// the stored rule), layering the CLI flags on top.
fn resolve_pattern(
    base: Option<RecurrencePattern>,
    args: &RecurrenceArgs,
    today: NaiveDate,
) -> Result<Option<RecurrencePattern>, Box<dyn std::error::Error>> {
    let mut seed = match (base, &args.repeat) {
        (Some(pattern), _) => pattern,
        (None, Some(repeat)) => RecurrencePattern::new(parse_frequency(repeat)?, today),
        (None, None) => {
            if args.any() {
                return Err("recurrence flags need --repeat".into());
            }
            return Ok(None);
        }
    };

    if let Some(start) = &args.start {
        seed.start_date = parse_date(start)?;
    }

    let mut builder = PatternBuilder::from_pattern(seed);
    if let Some(repeat) = &args.repeat {
        builder.set_frequency(parse_frequency(repeat)?);
    }
    if let Some(every) = args.every {
        builder.set_interval(every)?;
    }
    if let Some(on) = &args.on {
        // --on replaces the whole weekday selection
        for day in Weekday::ALL {
            if builder.pattern().weekly_days.contains(&day) {
                builder.toggle_weekday(day);
            }
        }
        for token in on.split(',') {
            let day = Weekday::from_rule_token(token.trim().to_uppercase().as_str())
                .ok_or_else(|| format!("unknown weekday: {} (use SU,MO,TU,WE,TH,FR,SA)", token))?;
            builder.toggle_weekday(day);
        }
    }
    if let Some(day) = args.month_day {
        builder.set_month_day(day)?;
    }
    if let Some(month) = args.month {
        builder.set_year_month(month)?;
    }
    if let Some(day) = args.day {
        builder.set_year_day(day)?;
    }
    if let Some(until) = &args.until {
        builder.set_termination(Termination::On(parse_date(until)?))?;
    }

    Ok(Some(builder.build()?))
}

/// Compile a pattern and bundle it with its series window
fn compile_recurrence(
    pattern: &RecurrencePattern,
) -> Result<RecurrenceDraft, Box<dyn std::error::Error>> {
    let rule = rule::compile(pattern)?;
    let end_date = match pattern.termination {
        Termination::On(end) => Some(end),
        Termination::Never => None,
    };
    Ok(RecurrenceDraft {
        rule,
        start_date: pattern.start_date,
        end_date,
    })
}

/// Decompile a stored record's rule back into an editable pattern
fn stored_pattern(
    record: &TaskRecord,
) -> Result<Option<RecurrencePattern>, Box<dyn std::error::Error>> {
    match &record.recurrence_rule {
        Some(stored_rule) => {
            let start = record
                .recurrence_start_date
                .unwrap_or_else(|| record.due_date_time.date());
            Ok(Some(rule::decompile(stored_rule, start)?))
        }
        None => Ok(None),
    }
}

fn parse_frequency(token: &str) -> Result<Frequency, String> {
    match token {
        "daily" => Ok(Frequency::Daily),
        "weekly" => Ok(Frequency::Weekly),
        "monthly" => Ok(Frequency::Monthly),
        "yearly" => Ok(Frequency::Yearly),
        _ => Err(format!(
            "unknown frequency: {} (daily | weekly | monthly | yearly)",
            token
        )),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {} (expected YYYY-MM-DD)", s))
}

/// Parse `YYYY-MM-DDTHH:MM`, or a bare date meaning midnight
fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    parse_date(s).map(|date| date.and_time(NaiveTime::MIN))
}

/// A reminder token is either a preset name or an explicit date-time
fn parse_reminder(token: &str, channel: &str) -> Result<ReminderSpec, Box<dyn std::error::Error>> {
    if let Some(preset) = ReminderPreset::from_token(token) {
        return Ok(resolve_preset(preset, Local::now().naive_local(), channel));
    }
    let at = parse_datetime(token)?;
    Ok(resolve_explicit(at.date(), at.time(), channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_accepts_bare_date() {
        let dt = parse_datetime("2025-01-06").unwrap();
        assert_eq!(dt.format("%Y-%m-%dT%H:%M").to_string(), "2025-01-06T00:00");
    }

    #[test]
    fn test_resolve_pattern_needs_repeat() {
        let args = RecurrenceArgs {
            repeat: None,
            every: None,
            on: Some("MO".to_string()),
            month_day: None,
            month: None,
            day: None,
            start: None,
            until: None,
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert!(resolve_pattern(None, &args, today).is_err());
    }

    #[test]
    fn test_resolve_pattern_replaces_weekdays_on_edit() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let base = rule::decompile("FREQ=WEEKLY;BYDAY=MO,TH", today).unwrap();
        let args = RecurrenceArgs {
            repeat: None,
            every: None,
            on: Some("fr".to_string()),
            month_day: None,
            month: None,
            day: None,
            start: None,
            until: None,
        };
        let pattern = resolve_pattern(Some(base), &args, today).unwrap().unwrap();
        let days: Vec<Weekday> = pattern.weekly_days.iter().copied().collect();
        assert_eq!(days, vec![Weekday::Fri]);
    }

    #[test]
    fn test_resolve_pattern_no_flags_is_none() {
        let args = RecurrenceArgs {
            repeat: None,
            every: None,
            on: None,
            month_day: None,
            month: None,
            day: None,
            start: None,
            until: None,
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert!(resolve_pattern(None, &args, today).unwrap().is_none());
    }
}
