use kitchen_storage::RangeQuery;

use super::KitchenInner;
use crate::{
    entities::{Pomodoro, Task},
    key::{self, Kind},
    params::{Day, EntityId},
    repository::Handle,
    utils::utc_now,
    KitchenError, Result,
};

impl KitchenInner {
    /// Every pomodoro of the day whatever its task, including pomodoros of
    /// deleted tasks.
    pub async fn list_all_pomodoros(&self, day: &Day) -> Result<Vec<Pomodoro>> {
        let query =
            RangeQuery::partition(key::day_partition(day.user.as_str(), Kind::Pomodoro, day.date));
        self.pomodoros.list(&query).await
    }

    pub async fn list_pomodoros(&self, day: &Day, task_id: &EntityId) -> Result<Vec<Pomodoro>> {
        let task = self.require_task(day, task_id).await?;
        let query = RangeQuery::partition(key::day_partition(
            &task.user_id,
            Kind::Pomodoro,
            task.date,
        ))
        .begins_with(key::pomodoro_task_prefix(&task.task_id));
        self.pomodoros.list(&query).await
    }

    pub async fn start_pomodoro(&self, day: &Day, task_id: &EntityId) -> Result<Pomodoro> {
        let task = self.require_task(day, task_id).await?;
        let pomodoro = self
            .pomodoros
            .create(|pomodoro_id| Pomodoro::start(&task, pomodoro_id, utc_now()))
            .await?;
        tracing::info!(
            user = %day.user,
            %task_id,
            pomodoro_id = %pomodoro.pomodoro_id,
            "pomodoro started"
        );
        Ok(pomodoro.into_inner())
    }

    pub async fn get_pomodoro(
        &self,
        day: &Day,
        task_id: &EntityId,
        pomodoro_id: &EntityId,
    ) -> Result<Pomodoro> {
        let task = self.require_task(day, task_id).await?;
        Ok(self.require_pomodoro(&task, pomodoro_id).await?.into_inner())
    }

    pub async fn finish_pomodoro(
        &self,
        day: &Day,
        task_id: &EntityId,
        pomodoro_id: &EntityId,
    ) -> Result<Pomodoro> {
        let task = self.require_task(day, task_id).await?;
        let mut pomodoro = self.require_pomodoro(&task, pomodoro_id).await?;
        pomodoro.finish(utc_now());
        self.pomodoros.update(&pomodoro).await?;
        Ok(pomodoro.into_inner())
    }

    pub async fn delete_pomodoro(
        &self,
        day: &Day,
        task_id: &EntityId,
        pomodoro_id: &EntityId,
    ) -> Result<()> {
        let task = self.require_task(day, task_id).await?;
        let pomodoro = self.require_pomodoro(&task, pomodoro_id).await?;
        self.pomodoros.delete(pomodoro).await?;
        Ok(())
    }

    async fn require_pomodoro(
        &self,
        task: &Task,
        pomodoro_id: &EntityId,
    ) -> Result<Handle<Pomodoro>> {
        self.pomodoros
            .get(&key::pomodoro_key(
                &task.user_id,
                task.date,
                &task.task_id,
                pomodoro_id.as_str(),
            ))
            .await?
            .ok_or_else(|| KitchenError::not_found(format!("Pomodoro not found: {pomodoro_id}")))
    }
}
