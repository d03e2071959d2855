//! Template repository module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::templates::{
    errors::{GetTemplateError, GetTranslationError},
    EmailTemplate, EmailTemplateTranslation,
};

/// Template store
#[async_trait]
pub trait TemplateRepository: Clone + Send + Sync + 'static {
    /// Get a template by its ID
    async fn get_template_by_id(&self, id: i64) -> Result<EmailTemplate, GetTemplateError>;

    /// Get a template by its slug
    async fn get_template_by_slug(&self, slug: &str) -> Result<EmailTemplate, GetTemplateError>;

    /// Get the translation of a template for a language
    async fn get_translation(
        &self,
        template_id: i64,
        language_id: i64,
    ) -> Result<EmailTemplateTranslation, GetTranslationError>;
}

#[cfg(test)]
mock! {
    pub TemplateRepository {}

    impl Clone for TemplateRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TemplateRepository for TemplateRepository {
        async fn get_template_by_id(&self, id: i64) -> Result<EmailTemplate, GetTemplateError>;
        async fn get_template_by_slug(&self, slug: &str) -> Result<EmailTemplate, GetTemplateError>;
        async fn get_translation(
            &self,
            template_id: i64,
            language_id: i64,
        ) -> Result<EmailTemplateTranslation, GetTranslationError>;
    }
}
