use serde_derive::{Deserialize, Serialize};

/// Two-part address of a record: items sharing a partition can be range
/// scanned, ordered by their sort key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub partition: String,
    pub sort: String,
}

impl RecordKey {
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.partition, self.sort)
    }
}

/// A stored row; `item` is the JSON document of the entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: RecordKey,
    pub item: serde_json::Value,
}

impl Record {
    pub fn new(key: RecordKey, item: serde_json::Value) -> Self {
        Self { key, item }
    }
}

/// Scan of a single partition. Bounds are inclusive and compared
/// lexicographically against the sort key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeQuery {
    pub partition: String,
    pub lower: Option<String>,
    pub upper: Option<String>,
    pub prefix: Option<String>,
}

impl RangeQuery {
    pub fn partition(partition: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            ..Default::default()
        }
    }

    pub fn lower_bound(mut self, sort: impl Into<String>) -> Self {
        self.lower = Some(sort.into());
        self
    }

    pub fn upper_bound(mut self, sort: impl Into<String>) -> Self {
        self.upper = Some(sort.into());
        self
    }

    pub fn begins_with(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn matches(&self, key: &RecordKey) -> bool {
        key.partition == self.partition && self.matches_sort(&key.sort)
    }

    pub fn matches_sort(&self, sort: &str) -> bool {
        if let Some(lower) = &self.lower {
            if sort < lower.as_str() {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            if sort > upper.as_str() {
                return false;
            }
        }
        match &self.prefix {
            Some(prefix) => sort.starts_with(prefix.as_str()),
            None => true,
        }
    }
}
