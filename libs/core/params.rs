//! Validation of raw path and query parameters. Everything here runs before
//! any store access.

use chrono::NaiveDate;
use lazy_regex::regex_is_match;
use std::fmt;

use crate::{KitchenError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMAT_HINT: &str = "YYYY-MM-DD, e.g. 2018-03-22";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(KitchenError::bad_request("user parameter is empty"));
        }
        if !regex_is_match!(r"^[A-Za-z0-9@_\-]+$", raw) {
            return Err(KitchenError::bad_request(format!(
                "Invalid user '{raw}', only letters, digits, '@', '_' and '-' are allowed"
            )));
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a task, chore or pomodoro taken from the path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        if !regex_is_match!(r"^[A-Za-z0-9_\-]+$", raw) {
            return Err(KitchenError::bad_request(format!(
                "Invalid {name} '{raw}', only letters, digits, '_' and '-' are allowed"
            )));
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse_date(name: &str, raw: &str) -> Result<NaiveDate> {
    let invalid = || {
        KitchenError::bad_request(format!(
            "Invalid {name} format '{raw}', should be {DATE_FORMAT_HINT}"
        ))
    };

    // chrono accepts signed and unpadded fields, the sort key needs exactly
    // four year digits
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

pub fn require_date(name: &str, raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) if !raw.is_empty() => parse_date(name, raw),
        _ => Err(KitchenError::bad_request(format!(
            "{name} parameter is required, should be {DATE_FORMAT_HINT}"
        ))),
    }
}

/// A user's day, the scope shared by tasks, chores, pomodoros and reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Day {
    pub user: UserId,
    pub date: NaiveDate,
}

impl Day {
    pub fn parse(user: &str, date: &str) -> Result<Self> {
        Ok(Self {
            user: UserId::parse(user)?,
            date: parse_date("date", date)?,
        })
    }
}

/// Inclusive range of dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn parse(begin: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            begin: require_date("begin", begin)?,
            end: require_date("end", end)?,
        })
    }
}
