use regex::Regex;

use crate::model::task::TaskRecord;

/// Filter records whose title matches the regex
pub fn filter_by_title<'a>(records: &'a [TaskRecord], pattern: &Regex) -> Vec<&'a TaskRecord> {
    records
        .iter()
        .filter(|record| pattern.is_match(&record.title))
        .collect()
}
