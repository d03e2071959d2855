//! Error types for composing and sending emails

use thiserror::Error;
use tracing::debug;

use crate::domain::{
    communication::mailer::MailerError,
    delivery_log::errors::CreateClientEmailError,
    directory::errors::{GetClientError, GetLanguageError, GetStaffError},
    templates::{
        errors::{GetTemplateError, GetTranslationError},
        TemplateIdentifier,
    },
};

/// Errors that can occur when composing a message from a template
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Template not found
    #[error("template {0} not found")]
    TemplateNotFound(TemplateIdentifier),

    /// Neither the requested nor the default language has a translation
    #[error("template {template} has no translation for language {language_id} or the default language")]
    TranslationNotFound {
        /// The template that was found
        template: TemplateIdentifier,

        /// The requested language
        language_id: i64,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl ComposeError {
    /// Whether the template or a usable translation was missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TemplateNotFound(_) | Self::TranslationNotFound { .. }
        )
    }
}

impl From<GetTemplateError> for ComposeError {
    fn from(err: GetTemplateError) -> Self {
        debug!("GetTemplateError -> ComposeError");

        match err {
            GetTemplateError::TemplateNotFound(identifier) => {
                ComposeError::TemplateNotFound(identifier)
            }
            GetTemplateError::UnknownError(e) => ComposeError::UnknownError(e),
        }
    }
}

impl From<GetTranslationError> for ComposeError {
    fn from(err: GetTranslationError) -> Self {
        debug!("GetTranslationError -> ComposeError");

        ComposeError::UnknownError(err.into())
    }
}

/// Errors that can occur when sending an email
#[derive(Debug, Error)]
pub enum EmailError {
    /// Template or translation missing
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// Client not found
    #[error("client {0} not found")]
    ClientNotFound(i64),

    /// Staff member not found
    #[error("staff member {0} not found")]
    StaffNotFound(i64),

    /// The transport failed
    #[error("could not send email: {0}")]
    CouldNotSendEmail(#[from] MailerError),

    /// The email was sent but could not be logged
    #[error("email was sent but could not be logged: {0}")]
    CouldNotLogEmail(#[from] CreateClientEmailError),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<GetClientError> for EmailError {
    fn from(err: GetClientError) -> Self {
        debug!("GetClientError -> EmailError");

        match err {
            GetClientError::ClientNotFound(id) => EmailError::ClientNotFound(id),
            GetClientError::UnknownError(e) => EmailError::UnknownError(e),
        }
    }
}

impl From<GetStaffError> for EmailError {
    fn from(err: GetStaffError) -> Self {
        debug!("GetStaffError -> EmailError");

        match err {
            GetStaffError::StaffNotFound(id) => EmailError::StaffNotFound(id),
            GetStaffError::UnknownError(e) => EmailError::UnknownError(e),
        }
    }
}

impl From<GetLanguageError> for EmailError {
    fn from(err: GetLanguageError) -> Self {
        debug!("GetLanguageError -> EmailError");

        EmailError::UnknownError(err.into())
    }
}

impl From<serde_json::Error> for EmailError {
    fn from(err: serde_json::Error) -> Self {
        debug!("serde_json::Error -> EmailError");

        EmailError::UnknownError(err.into())
    }
}
