use chrono::{DateTime, NaiveDate, Utc};
use kitchen_storage::RecordKey;
use serde_derive::{Deserialize, Serialize};

use super::task::Task;
use crate::{
    key::{self, Kind},
    repository::Entity,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PomodoroStatus {
    Started,
    Finished,
}

/// A focus session of a task, stored in the day partition of its task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pomodoro {
    pub user_id: String,
    pub date: NaiveDate,
    pub task_id: String,
    pub pomodoro_id: String,
    pub status: PomodoroStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_scheduled: bool,
}

impl Pomodoro {
    pub fn start(task: &Task, pomodoro_id: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id: task.user_id.clone(),
            date: task.date,
            task_id: task.task_id.clone(),
            pomodoro_id,
            status: PomodoroStatus::Started,
            started_at: now,
            finished_at: None,
            is_scheduled: false,
        }
    }

    /// Finishing again overwrites the previous timestamp.
    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.status = PomodoroStatus::Finished;
        self.finished_at = Some(now);
    }
}

impl Entity for Pomodoro {
    const KIND: Kind = Kind::Pomodoro;

    fn key(&self) -> RecordKey {
        key::pomodoro_key(&self.user_id, self.date, &self.task_id, &self.pomodoro_id)
    }
}
