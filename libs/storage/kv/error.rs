/// Failure reported by a [`Store`](crate::Store).
///
/// `NotFound` is the store's "no such item" signal and is not a fault by
/// itself; callers decide whether absence matters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no item found")]
    NotFound,
    #[error("storage backend failure: {0}")]
    Backend(eyre::Report),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

impl From<eyre::Report> for StoreError {
    fn from(value: eyre::Report) -> Self {
        Self::Backend(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Backend(value.into())
    }
}
