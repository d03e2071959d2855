//! Error types for directory lookups

use thiserror::Error;

/// Errors that can occur when getting a client
#[derive(Debug, Error)]
pub enum GetClientError {
    /// Client not found
    #[error("Client {0} not found")]
    ClientNotFound(i64),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when getting a staff member
#[derive(Debug, Error)]
pub enum GetStaffError {
    /// Staff member not found
    #[error("Staff member {0} not found")]
    StaffNotFound(i64),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when getting a language
#[derive(Debug, Error)]
pub enum GetLanguageError {
    /// Language not found
    #[error("Language {0} not found")]
    LanguageNotFound(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
