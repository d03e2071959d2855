//! Error types for template lookups

use thiserror::Error;

use super::TemplateIdentifier;

/// Errors that can occur when getting a template
#[derive(Debug, Error)]
pub enum GetTemplateError {
    /// Template not found
    #[error("Template {0} not found")]
    TemplateNotFound(TemplateIdentifier),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur when getting a template translation
#[derive(Debug, Error)]
pub enum GetTranslationError {
    /// No translation for the language
    #[error("Template #{template_id} has no translation for language {language_id}")]
    TranslationNotFound {
        /// The template ID
        template_id: i64,

        /// The requested language ID
        language_id: i64,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
