//! Mailer errors

use lettre::address::AddressError;
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The transport failed to deliver the message
    #[error("An error occurred while sending the email: {0}")]
    SendError(anyhow::Error),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// An attachment could not be loaded or described
    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),

    /// The transport could not be configured
    #[error("Invalid mail transport configuration: {0}")]
    InvalidConfig(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(err: AddressError) -> Self {
        MailerError::InvalidEmail(err.to_string())
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}
