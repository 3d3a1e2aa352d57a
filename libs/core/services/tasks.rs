use kitchen_storage::RangeQuery;

use super::KitchenInner;
use crate::{
    entities::{Task, TaskUpdate, TitleInput},
    key::{self, Kind},
    params::{Day, EntityId},
    repository::Handle,
    KitchenError, Result,
};

impl KitchenInner {
    pub async fn list_tasks(&self, day: &Day) -> Result<Vec<Task>> {
        let query = RangeQuery::partition(key::day_partition(day.user.as_str(), Kind::Task, day.date));
        self.tasks.list(&query).await
    }

    /// Create a task, taking its title from `input` when one is given.
    pub async fn create_task(&self, day: &Day, input: Option<TitleInput>) -> Result<Task> {
        let mut task = self
            .tasks
            .create(|task_id| {
                Task::builder()
                    .user_id(day.user.as_str())
                    .date(day.date)
                    .task_id(task_id)
                    .build()
            })
            .await?;
        tracing::info!(user = %day.user, task_id = %task.task_id, "task created");

        if let Some(title) = input.map(|i| i.title).filter(|t| !t.is_empty()) {
            task.title = title;
            self.tasks.update(&task).await?;
        }
        Ok(task.into_inner())
    }

    pub async fn get_task(&self, day: &Day, task_id: &EntityId) -> Result<Task> {
        Ok(self.require_task(day, task_id).await?.into_inner())
    }

    pub async fn update_task(
        &self,
        day: &Day,
        task_id: &EntityId,
        update: TaskUpdate,
    ) -> Result<Task> {
        let mut task = self.require_task(day, task_id).await?;
        let merged = update.merge_with_task(&task);
        *task = merged;
        self.tasks.update(&task).await?;
        Ok(task.into_inner())
    }

    /// Pomodoros of the task are left in place, they become unreachable.
    pub async fn delete_task(&self, day: &Day, task_id: &EntityId) -> Result<()> {
        let task = self.require_task(day, task_id).await?;
        self.tasks.delete(task).await?;
        tracing::info!(user = %day.user, %task_id, "task deleted");
        Ok(())
    }

    pub(super) async fn require_task(&self, day: &Day, task_id: &EntityId) -> Result<Handle<Task>> {
        self.tasks
            .get(&key::entity_key(
                day.user.as_str(),
                Kind::Task,
                day.date,
                task_id.as_str(),
            ))
            .await?
            .ok_or_else(|| KitchenError::not_found(format!("Task not found: {task_id}")))
    }
}
