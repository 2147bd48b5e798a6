use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cad", about = concat!("cadence v", env!("CARGO_PKG_VERSION"), " - recurring tasks for your pipeline"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different planner directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new planner in the current directory
    Init(InitArgs),
    /// Add a task, optionally recurring
    Add(AddArgs),
    /// List task occurrences for a view
    List(ListArgs),
    /// Show task details
    Show(ShowArgs),
    /// Edit a task's title or recurrence
    Edit(EditArgs),
    /// Attach a reminder to a task
    Remind(RemindArgs),
    /// Permanently delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Planner name (defaults to the directory name)
    pub name: Option<String>,
}

/// Recurrence flags shared by `add` and `edit`
#[derive(Args)]
pub struct RecurrenceArgs {
    /// Repeat frequency: daily | weekly | monthly | yearly
    #[arg(long)]
    pub repeat: Option<String>,
    /// Repeat every N units
    #[arg(long)]
    pub every: Option<u32>,
    /// Weekdays for weekly repeats, e.g. MO,TH
    #[arg(long)]
    pub on: Option<String>,
    /// Day of month for monthly repeats
    #[arg(long)]
    pub month_day: Option<u8>,
    /// Month for yearly repeats
    #[arg(long)]
    pub month: Option<u8>,
    /// Day of month for yearly repeats
    #[arg(long)]
    pub day: Option<u8>,
    /// First occurrence date (defaults to today)
    #[arg(long)]
    pub start: Option<String>,
    /// Last possible occurrence date
    #[arg(long)]
    pub until: Option<String>,
}

impl RecurrenceArgs {
    /// Whether any recurrence flag was given at all
    pub fn any(&self) -> bool {
        self.repeat.is_some()
            || self.every.is_some()
            || self.on.is_some()
            || self.month_day.is_some()
            || self.month.is_some()
            || self.day.is_some()
            || self.start.is_some()
            || self.until.is_some()
    }
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Longer description
    #[arg(long)]
    pub desc: Option<String>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Due date-time, YYYY-MM-DD[THH:MM]
    #[arg(long)]
    pub due: Option<String>,
    #[command(flatten)]
    pub recurrence: RecurrenceArgs,
    /// Reminder: tomorrow | next-week | someday | YYYY-MM-DD[THH:MM]
    #[arg(long)]
    pub remind: Option<String>,
    /// Reminder channel (defaults to config)
    #[arg(long)]
    pub channel: Option<String>,
    /// Team the task belongs to (makes it a team task)
    #[arg(long)]
    pub team: Option<String>,
    /// Assignee for a personal task
    #[arg(long, conflicts_with = "team")]
    pub assignee: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Time window: today | week | all
    #[arg(long, default_value = "week")]
    pub view: String,
    /// Ownership partition: personal | team
    #[arg(long, default_value = "personal")]
    pub scope: String,
    /// Filter titles by regex
    #[arg(long = "match")]
    pub pattern: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Occurrence ID
    pub id: u64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Occurrence ID
    pub id: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    #[command(flatten)]
    pub recurrence: RecurrenceArgs,
}

#[derive(Args)]
pub struct RemindArgs {
    /// Occurrence ID
    pub id: u64,
    /// tomorrow | next-week | someday | YYYY-MM-DD[THH:MM]
    pub when: String,
    /// Reminder channel (defaults to config)
    #[arg(long)]
    pub channel: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Occurrence ID
    pub id: u64,
}
