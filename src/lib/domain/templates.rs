//! Email templates and their per-language translations.

mod identifier;
mod repository;
mod template;

pub mod errors;

pub use identifier::TemplateIdentifier;
pub use repository::TemplateRepository;
pub use template::{EmailTemplate, EmailTemplateTranslation, DEFAULT_LANGUAGE_ID};

#[cfg(test)]
pub mod tests {
    pub use super::repository::MockTemplateRepository;
}
