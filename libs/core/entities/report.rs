use chrono::NaiveDate;
use kitchen_storage::RecordKey;
use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;
use typed_builder::TypedBuilder;

use crate::{
    key::{self, Kind},
    repository::Entity,
    KitchenError, Result,
};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Editing,
    Working,
    Done,
}

impl ReportStatus {
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_str(raw).map_err(|_| {
            KitchenError::bad_request(format!(
                "Invalid report status '{raw}', should be one of editing, working, done"
            ))
        })
    }
}

/// Status of one workday, there is at most one per user and date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct Report {
    #[builder(setter(into))]
    pub user_id: String,
    pub date: NaiveDate,
    #[builder(default)]
    pub status: ReportStatus,
}

impl Entity for Report {
    const KIND: Kind = Kind::Report;

    fn key(&self) -> RecordKey {
        key::report_key(&self.user_id, self.date)
    }
}

/// Body of a report update. The status stays a raw string so an unknown value
/// is reported as a validation error rather than a malformed body.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReportUpdate {
    #[serde(default)]
    pub status: String,
}
