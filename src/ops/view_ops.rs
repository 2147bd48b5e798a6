use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::config::WeekStart;
use crate::model::draft::Scope;

/// Which time window of occurrences a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewWindow {
    Today,
    Week,
    All,
}

impl ViewWindow {
    /// Parse a CLI token
    pub fn from_token(token: &str) -> Option<ViewWindow> {
        match token {
            "today" => Some(ViewWindow::Today),
            "week" => Some(ViewWindow::Week),
            "all" => Some(ViewWindow::All),
            _ => None,
        }
    }
}

/// Query bounds handed to the store's list endpoint. `None` bounds mean
/// unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBounds {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub scope: Scope,
}

/// Map a view and scope to the bounds used to request occurrences.
///
/// Pure: the same view, scope, and reference date always produce the same
/// bounds. Scope passes through untouched; it picks the ownership
/// partition, never the dates.
pub fn resolve_bounds(
    view: ViewWindow,
    scope: Scope,
    today: NaiveDate,
    week_start: WeekStart,
) -> QueryBounds {
    let (from, to) = match view {
        ViewWindow::Today => (Some(today), Some(today)),
        ViewWindow::Week => {
            let days_in = match week_start {
                WeekStart::Monday => today.weekday().num_days_from_monday(),
                WeekStart::Sunday => today.weekday().num_days_from_sunday(),
            };
            let first = today - Duration::days(days_in as i64);
            (Some(first), Some(first + Duration::days(6)))
        }
        ViewWindow::All => (None, None),
    };
    QueryBounds { from, to, scope }
}
