use serde::{Deserialize, Serialize};

/// Configuration from cadence.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub planner: PlannerInfo,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub views: ViewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            default_channel: default_channel(),
        }
    }
}

fn default_channel() -> String {
    "notification".to_string()
}

/// First day of the calendar week for the Week view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_week_start")]
    pub week_start: WeekStart,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            week_start: default_week_start(),
        }
    }
}

fn default_week_start() -> WeekStart {
    WeekStart::Monday
}
