use derive_more::Deref;
use kitchen_storage::StoreBox;
use std::sync::Arc;

use crate::{
    entities::{Chore, Pomodoro, Report, Task},
    repository::Repository,
    IdGenerator,
};

mod chores;
mod pomodoros;
mod reports;
mod tasks;

/// Every resource operation, shared by all requests.
#[derive(Clone, Deref)]
pub struct Kitchen(Arc<KitchenInner>);

pub struct KitchenInner {
    reports: Repository<Report>,
    tasks: Repository<Task>,
    chores: Repository<Chore>,
    pomodoros: Repository<Pomodoro>,
}

impl Kitchen {
    pub fn new(store: StoreBox) -> Self {
        let ids = Arc::new(IdGenerator::new());
        Self(Arc::new(KitchenInner {
            reports: Repository::new(store.clone(), ids.clone()),
            tasks: Repository::new(store.clone(), ids.clone()),
            chores: Repository::new(store.clone(), ids.clone()),
            pomodoros: Repository::new(store, ids),
        }))
    }
}
