//! Error taxonomy shared by the session and catalog stores.

use thiserror::Error;

/// Failure of a store operation.
///
/// Every variant except [`StoreError::NoStoredSession`] is captured into the
/// owning store's `error` field so the UI can show it until dismissed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Missing or malformed required input.
    #[error("{0}")]
    Validation(String),

    /// Email/password did not match an account.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Nothing persisted to restore; the normal "not logged in" path.
    #[error("No stored user data")]
    NoStoredSession,

    /// Reading or writing a persisted key failed.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    pub fn is_no_stored_session(&self) -> bool {
        matches!(self, Self::NoStoredSession)
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Whether this failure should be shown to the user.
    pub fn is_user_facing(&self) -> bool {
        !self.is_no_stored_session()
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("serialization: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
