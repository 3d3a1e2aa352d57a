use kitchen_storage::RangeQuery;

use super::KitchenInner;
use crate::{
    entities::{Chore, ChoreUpdate, TitleInput},
    key::{self, Kind},
    params::{Day, EntityId},
    repository::Handle,
    KitchenError, Result,
};

impl KitchenInner {
    pub async fn list_chores(&self, day: &Day) -> Result<Vec<Chore>> {
        let query =
            RangeQuery::partition(key::day_partition(day.user.as_str(), Kind::Chore, day.date));
        self.chores.list(&query).await
    }

    pub async fn create_chore(&self, day: &Day, input: Option<TitleInput>) -> Result<Chore> {
        let mut chore = self
            .chores
            .create(|chore_id| {
                Chore::builder()
                    .user_id(day.user.as_str())
                    .date(day.date)
                    .chore_id(chore_id)
                    .build()
            })
            .await?;
        tracing::info!(user = %day.user, chore_id = %chore.chore_id, "chore created");

        if let Some(title) = input.map(|i| i.title).filter(|t| !t.is_empty()) {
            chore.title = title;
            self.chores.update(&chore).await?;
        }
        Ok(chore.into_inner())
    }

    pub async fn update_chore(
        &self,
        day: &Day,
        chore_id: &EntityId,
        update: ChoreUpdate,
    ) -> Result<Chore> {
        let mut chore = self.require_chore(day, chore_id).await?;
        update.apply(&mut chore);
        self.chores.update(&chore).await?;
        Ok(chore.into_inner())
    }

    pub async fn delete_chore(&self, day: &Day, chore_id: &EntityId) -> Result<()> {
        let chore = self.require_chore(day, chore_id).await?;
        self.chores.delete(chore).await?;
        Ok(())
    }

    async fn require_chore(&self, day: &Day, chore_id: &EntityId) -> Result<Handle<Chore>> {
        self.chores
            .get(&key::entity_key(
                day.user.as_str(),
                Kind::Chore,
                day.date,
                chore_id.as_str(),
            ))
            .await?
            .ok_or_else(|| KitchenError::not_found(format!("Chore not found: {chore_id}")))
    }
}
