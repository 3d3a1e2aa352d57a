use kitchen_storage::StoreError;

pub type Result<T> = core::result::Result<T, KitchenError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserErrorKind {
    BadRequest,
    NotFound,
}

/// Client-caused failure, its message is safe to show to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UserError {
    pub kind: UserErrorKind,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum KitchenError {
    #[error(transparent)]
    User(#[from] UserError),
    /// Anything else (storage, serialization, id generation). Never exposed.
    #[error("internal error: {0:?}")]
    System(eyre::Report),
}

impl KitchenError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::User(UserError {
            kind: UserErrorKind::BadRequest,
            message: message.into(),
        })
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::User(UserError {
            kind: UserErrorKind::NotFound,
            message: message.into(),
        })
    }

    pub fn user_error(&self) -> Option<&UserError> {
        match self {
            Self::User(e) => Some(e),
            Self::System(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.user_error(), Some(e) if e.kind == UserErrorKind::NotFound)
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self.user_error(), Some(e) if e.kind == UserErrorKind::BadRequest)
    }
}

impl From<eyre::Report> for KitchenError {
    fn from(value: eyre::Report) -> Self {
        Self::System(value)
    }
}

impl From<StoreError> for KitchenError {
    fn from(value: StoreError) -> Self {
        Self::System(eyre::Report::new(value))
    }
}

impl From<serde_json::Error> for KitchenError {
    fn from(value: serde_json::Error) -> Self {
        Self::System(eyre::Report::new(value))
    }
}
