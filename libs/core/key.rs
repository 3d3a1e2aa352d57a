//! Key codec: maps the (user, kind, date, id) hierarchy onto the
//! (partition, sort) pair of the store.
//!
//! | kind     | partition                 | sort                        |
//! |----------|---------------------------|-----------------------------|
//! | report   | `{user}/report`           | `{YYYYMMDD}`                |
//! | task     | `{user}/task/{YYYYMMDD}`  | `{task_id}`                 |
//! | chore    | `{user}/chore/{YYYYMMDD}` | `{chore_id}`                |
//! | pomodoro | `{user}/pomodoro/{YYYYMMDD}` | `{task_id}/{pomodoro_id}` |
//!
//! Dates are zero padded without separators so lexical order of sort keys
//! equals chronological order.

use chrono::NaiveDate;
use kitchen_storage::RecordKey;

pub const DATE_KEY_FORMAT: &str = "%Y%m%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Report,
    Task,
    Chore,
    Pomodoro,
}

pub fn date_sort_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn report_partition(user: &str) -> String {
    format!("{user}/{}", Kind::Report)
}

pub fn report_key(user: &str, date: NaiveDate) -> RecordKey {
    RecordKey::new(report_partition(user), date_sort_key(date))
}

/// Partition holding every `kind` entity of a user for one day.
pub fn day_partition(user: &str, kind: Kind, date: NaiveDate) -> String {
    format!("{user}/{kind}/{}", date_sort_key(date))
}

pub fn entity_key(user: &str, kind: Kind, date: NaiveDate, id: &str) -> RecordKey {
    RecordKey::new(day_partition(user, kind, date), id)
}

pub fn pomodoro_task_prefix(task_id: &str) -> String {
    format!("{task_id}/")
}

pub fn pomodoro_key(user: &str, date: NaiveDate, task_id: &str, pomodoro_id: &str) -> RecordKey {
    RecordKey::new(
        day_partition(user, Kind::Pomodoro, date),
        format!("{}{pomodoro_id}", pomodoro_task_prefix(task_id)),
    )
}
