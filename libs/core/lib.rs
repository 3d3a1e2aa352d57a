pub mod entities;
pub mod error;
pub mod key;
pub mod params;
pub mod repository;
pub mod services;
mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_support;

pub use error::{KitchenError, Result, UserError, UserErrorKind};
pub use kitchen_storage::{RangeQuery, RecordKey, StoreBox};
pub use services::{Kitchen, KitchenInner};
pub use utils::IdGenerator;
