use chrono::NaiveDate;
use kitchen_storage::RecordKey;
use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    key::{self, Kind},
    repository::Entity,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct Chore {
    #[builder(setter(into))]
    pub user_id: String,
    pub date: NaiveDate,
    #[builder(setter(into))]
    pub chore_id: String,
    #[builder(default, setter(into))]
    pub title: String,
    #[builder(default)]
    pub done: bool,
    #[builder(default, setter(into))]
    pub description: String,
}

impl Entity for Chore {
    const KIND: Kind = Kind::Chore;

    fn key(&self) -> RecordKey {
        key::entity_key(&self.user_id, Kind::Chore, self.date, &self.chore_id)
    }
}

/// Chore updates only ever touch the title.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChoreUpdate {
    pub title: Option<String>,
}

impl ChoreUpdate {
    pub fn apply(self, chore: &mut Chore) {
        if let Some(title) = self.title {
            chore.title = title;
        }
    }
}
