use chrono::NaiveDate;
use kitchen_storage::RecordKey;
use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    key::{self, Kind},
    repository::Entity,
    KitchenError, Result,
};

pub type TaskId = String;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct Task {
    #[builder(setter(into))]
    pub user_id: String,
    pub date: NaiveDate,
    #[builder(setter(into))]
    pub task_id: TaskId,
    #[builder(default, setter(into))]
    pub title: String,
    #[builder(default = 1)]
    pub tomato_num: i64,
    #[builder(default, setter(into))]
    pub description: String,
}

impl Entity for Task {
    const KIND: Kind = Kind::Task;

    fn key(&self) -> RecordKey {
        key::entity_key(&self.user_id, Kind::Task, self.date, &self.task_id)
    }

    fn validate(&self) -> Result<()> {
        if self.tomato_num < 1 {
            return Err(KitchenError::bad_request(format!(
                "Invalid tomato_num {}, should be at least 1",
                self.tomato_num
            )));
        }
        Ok(())
    }
}

/// Partial update of a task, absent fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub tomato_num: Option<i64>,
    pub description: Option<String>,
}

impl TaskUpdate {
    pub fn merge_with_task(self, task: &Task) -> Task {
        Task {
            user_id: task.user_id.clone(),
            date: task.date,
            task_id: task.task_id.clone(),
            title: self.title.unwrap_or(task.title.clone()),
            tomato_num: self.tomato_num.unwrap_or(task.tomato_num),
            description: self.description.unwrap_or(task.description.clone()),
        }
    }
}

/// Optional body accepted when creating a task or a chore.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TitleInput {
    #[serde(default)]
    pub title: String,
}
