//! Message composer

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    communication::{
        entities::decode_html_entities,
        mailer::{Attachment, ComposedMessage, ContentType, Recipients},
        renderer::{Renderer, TemplateData},
    },
    templates::{
        errors::GetTranslationError, EmailTemplate, EmailTemplateTranslation, TemplateIdentifier,
        TemplateRepository, DEFAULT_LANGUAGE_ID,
    },
};

use super::errors::ComposeError;

/// Builds [`ComposedMessage`]s from stored templates
#[derive(Debug, Clone)]
pub struct TemplateComposer<T>
where
    T: TemplateRepository,
{
    templates: Arc<T>,
    renderer: Renderer,
    sender: String,
}

impl<T> TemplateComposer<T>
where
    T: TemplateRepository,
{
    /// Creates a new composer sending from `sender`
    pub fn new(templates: Arc<T>, renderer: Renderer, sender: impl Into<String>) -> Self {
        Self {
            templates,
            renderer,
            sender: sender.into(),
        }
    }

    /// Composes a message from a template.
    ///
    /// # Arguments
    /// * `to` - The recipients.
    /// * `identifier` - The template's ID or slug.
    /// * `html` - Whether to use the HTML or the plain text body.
    /// * `data` - Variables for the subject and body.
    /// * `attachments` - Files to attach.
    /// * `language_id` - The preferred language; the default language is used
    ///   when the template has no translation for it.
    ///
    /// # Returns
    /// The [`ComposedMessage`], or a [`ComposeError`] that
    /// [is not found](ComposeError::is_not_found) when the template or a usable
    /// translation is missing.
    pub async fn compose_from_template(
        &self,
        to: Recipients,
        identifier: &TemplateIdentifier,
        html: bool,
        data: &TemplateData,
        attachments: Vec<Attachment>,
        language_id: i64,
    ) -> Result<ComposedMessage, ComposeError> {
        let template = self.find_template(identifier).await?;
        let translation = self
            .find_translation(&template, identifier, language_id)
            .await?;

        let content_type = ContentType::from_html_flag(html);
        let body_template = decode_html_entities(translation.body(content_type));

        let body = match content_type {
            ContentType::Html => self.renderer.render_html(&body_template, data),
            ContentType::Plaintext => self.renderer.render(&body_template, data),
        };

        Ok(ComposedMessage {
            from: self.sender.clone(),
            to,
            reply_to: None,
            cc: template.cc_recipients(),
            bcc: template.bcc_recipients(),
            subject: self.renderer.render(&translation.subject, data),
            body,
            content_type,
            attachments,
        })
    }

    async fn find_template(
        &self,
        identifier: &TemplateIdentifier,
    ) -> Result<EmailTemplate, ComposeError> {
        let template = match identifier {
            TemplateIdentifier::Id(id) => self.templates.get_template_by_id(*id).await?,
            TemplateIdentifier::Slug(slug) => self.templates.get_template_by_slug(slug).await?,
        };

        Ok(template)
    }

    async fn find_translation(
        &self,
        template: &EmailTemplate,
        identifier: &TemplateIdentifier,
        language_id: i64,
    ) -> Result<EmailTemplateTranslation, ComposeError> {
        let not_found = || ComposeError::TranslationNotFound {
            template: identifier.clone(),
            language_id,
        };

        match self.templates.get_translation(template.id, language_id).await {
            Ok(translation) => return Ok(translation),
            Err(GetTranslationError::TranslationNotFound { .. })
                if language_id != DEFAULT_LANGUAGE_ID =>
            {
                debug!(
                    "template {} has no translation for language {}, using the default",
                    identifier, language_id
                );
            }
            Err(GetTranslationError::TranslationNotFound { .. }) => return Err(not_found()),
            Err(err) => return Err(err.into()),
        }

        match self
            .templates
            .get_translation(template.id, DEFAULT_LANGUAGE_ID)
            .await
        {
            Ok(translation) => Ok(translation),
            Err(GetTranslationError::TranslationNotFound { .. }) => Err(not_found()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use mockall::predicate::eq;
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::templates::{errors::GetTemplateError, tests::MockTemplateRepository};

    use super::*;

    fn template() -> EmailTemplate {
        EmailTemplate {
            id: 7,
            slug: "client_welcome".to_string(),
            cc: "a@x.com,b@x.com".to_string(),
            bcc: "audit@x.com".to_string(),
        }
    }

    fn translation(language_id: i64, subject: &str) -> EmailTemplateTranslation {
        EmailTemplateTranslation {
            id: language_id * 100,
            email_template_id: 7,
            language_id,
            subject: subject.to_string(),
            html_body: "&lt;p&gt;Hello {{name}}&lt;/p&gt;".to_string(),
            plaintext_body: "Hello {{name}}".to_string(),
        }
    }

    fn data() -> TemplateData {
        match json!({"name": "Ada"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn composer(repo: MockTemplateRepository) -> TemplateComposer<MockTemplateRepository> {
        TemplateComposer::new(Arc::new(repo), Renderer::new(), "noreply@example.com")
    }

    #[tokio::test]
    async fn test_compose_by_slug_in_requested_language() -> TestResult {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_slug()
            .times(1)
            .withf(|slug| slug == "client_welcome")
            .returning(|_| Ok(template()));

        repo.expect_get_translation()
            .times(1)
            .with(eq(7), eq(2))
            .returning(|_, language_id| Ok(translation(language_id, "Bienvenue {{name}}")));

        let message = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::from("client_welcome"),
                false,
                &data(),
                vec![],
                2,
            )
            .await?;

        assert_eq!(message.subject, "Bienvenue Ada");
        assert_eq!(message.body, "Hello Ada");
        assert_eq!(message.content_type, ContentType::Plaintext);
        assert_eq!(message.from, "noreply@example.com");
        assert_eq!(message.to, Recipients::Single("ada@example.com".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_compose_by_id_uses_id_lookup() -> TestResult {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_slug().times(0);
        repo.expect_get_template_by_id()
            .times(1)
            .with(eq(7))
            .returning(|_| Ok(template()));
        repo.expect_get_translation()
            .returning(|_, language_id| Ok(translation(language_id, "Welcome")));

        let message = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::from("7"),
                true,
                &data(),
                vec![],
                1,
            )
            .await?;

        assert_eq!(message.subject, "Welcome");

        Ok(())
    }

    #[tokio::test]
    async fn test_html_body_is_decoded_before_rendering() -> TestResult {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_id()
            .returning(|_| Ok(template()));
        repo.expect_get_translation()
            .returning(|_, language_id| Ok(translation(language_id, "Welcome")));

        let message = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::Id(7),
                true,
                &data(),
                vec![],
                1,
            )
            .await?;

        assert_eq!(message.body, "<p>Hello Ada</p>");
        assert_eq!(message.content_type, ContentType::Html);

        Ok(())
    }

    #[tokio::test]
    async fn test_falls_back_to_default_language() -> TestResult {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_id()
            .returning(|_| Ok(template()));

        repo.expect_get_translation()
            .times(1)
            .with(eq(7), eq(3))
            .returning(|template_id, language_id| {
                Err(GetTranslationError::TranslationNotFound {
                    template_id,
                    language_id,
                })
            });

        repo.expect_get_translation()
            .times(1)
            .with(eq(7), eq(DEFAULT_LANGUAGE_ID))
            .returning(|_, language_id| Ok(translation(language_id, "Default subject")));

        let message = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::Id(7),
                false,
                &data(),
                vec![],
                3,
            )
            .await?;

        assert_eq!(message.subject, "Default subject");

        Ok(())
    }

    #[tokio::test]
    async fn test_no_translation_is_not_found() {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_id()
            .returning(|_| Ok(template()));

        repo.expect_get_translation()
            .times(2)
            .returning(|template_id, language_id| {
                Err(GetTranslationError::TranslationNotFound {
                    template_id,
                    language_id,
                })
            });

        let result = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::Id(7),
                false,
                &data(),
                vec![],
                3,
            )
            .await;

        assert!(matches!(
            result,
            Err(ComposeError::TranslationNotFound { language_id: 3, .. })
        ));
        assert!(result.is_err_and(|err| err.is_not_found()));
    }

    #[tokio::test]
    async fn test_missing_template_is_not_found() {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_slug()
            .times(1)
            .returning(|slug| {
                Err(GetTemplateError::TemplateNotFound(TemplateIdentifier::Slug(
                    slug.to_string(),
                )))
            });
        repo.expect_get_translation().times(0);

        let result = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::from("missing"),
                true,
                &data(),
                vec![],
                1,
            )
            .await;

        assert!(matches!(result, Err(ComposeError::TemplateNotFound(_))));
    }

    #[tokio::test]
    async fn test_translation_lookup_failure_is_not_masked() {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_id()
            .returning(|_| Ok(template()));
        repo.expect_get_translation()
            .times(1)
            .returning(|_, _| Err(GetTranslationError::UnknownError(anyhow!("connection reset"))));

        let result = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::Id(7),
                true,
                &data(),
                vec![],
                2,
            )
            .await;

        assert!(matches!(result, Err(ComposeError::UnknownError(_))));
    }

    #[tokio::test]
    async fn test_template_cc_and_bcc_and_attachments() -> TestResult {
        let mut repo = MockTemplateRepository::new();

        repo.expect_get_template_by_id()
            .returning(|_| Ok(template()));
        repo.expect_get_translation()
            .returning(|_, language_id| Ok(translation(language_id, "Welcome")));

        let message = composer(repo)
            .compose_from_template(
                Recipients::from("ada@example.com"),
                &TemplateIdentifier::Id(7),
                true,
                &data(),
                vec![Attachment::data("hello").with_filename("hello.txt")],
                1,
            )
            .await?;

        assert_eq!(
            message.cc,
            Some(Recipients::List(vec![
                "a@x.com".to_string(),
                "b@x.com".to_string()
            ]))
        );
        assert_eq!(
            message.bcc,
            Some(Recipients::Single("audit@x.com".to_string()))
        );
        assert_eq!(message.attachments.len(), 1);

        Ok(())
    }
}
