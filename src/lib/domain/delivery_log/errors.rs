//! Error types for the delivery log

use thiserror::Error;

/// Errors that can occur when logging a sent email
#[derive(Debug, Error)]
pub enum CreateClientEmailError {
    /// The client the email belongs to does not exist
    #[error("Client {0} not found")]
    ClientNotFound(i64),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when reading the delivery log
#[derive(Debug, Error)]
pub enum GetClientEmailsError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
