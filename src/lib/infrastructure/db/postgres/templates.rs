//! Postgres implementation of the TemplateRepository trait

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{query_as, Error::RowNotFound, FromRow};

use crate::{
    domain::templates::{
        errors::{GetTemplateError, GetTranslationError},
        EmailTemplate, EmailTemplateTranslation, TemplateIdentifier, TemplateRepository,
    },
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct TemplateRecord {
    id: i64,
    slug: String,
    cc: Option<String>,
    bcc: Option<String>,
}

impl From<TemplateRecord> for EmailTemplate {
    fn from(record: TemplateRecord) -> Self {
        EmailTemplate {
            id: record.id,
            slug: record.slug,
            cc: record.cc.unwrap_or_default(),
            bcc: record.bcc.unwrap_or_default(),
        }
    }
}

#[derive(FromRow)]
struct TranslationRecord {
    id: i64,
    email_template_id: i64,
    language_id: i64,
    subject: String,
    html_body: String,
    plaintext_body: String,
}

impl From<TranslationRecord> for EmailTemplateTranslation {
    fn from(record: TranslationRecord) -> Self {
        EmailTemplateTranslation {
            id: record.id,
            email_template_id: record.email_template_id,
            language_id: record.language_id,
            subject: record.subject,
            html_body: record.html_body,
            plaintext_body: record.plaintext_body,
        }
    }
}

#[async_trait]
impl TemplateRepository for PostgresDatabase {
    #[mutants::skip]
    async fn get_template_by_id(&self, id: i64) -> Result<EmailTemplate, GetTemplateError> {
        Ok(query_as::<_, TemplateRecord>(
            r#"
            SELECT id, slug, cc, bcc
            FROM email_templates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetTemplateError::TemplateNotFound(TemplateIdentifier::Id(id)),
            _ => GetTemplateError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }

    #[mutants::skip]
    async fn get_template_by_slug(&self, slug: &str) -> Result<EmailTemplate, GetTemplateError> {
        Ok(query_as::<_, TemplateRecord>(
            r#"
            SELECT id, slug, cc, bcc
            FROM email_templates
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => {
                GetTemplateError::TemplateNotFound(TemplateIdentifier::Slug(slug.to_string()))
            }
            _ => GetTemplateError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }

    #[mutants::skip]
    async fn get_translation(
        &self,
        template_id: i64,
        language_id: i64,
    ) -> Result<EmailTemplateTranslation, GetTranslationError> {
        Ok(query_as::<_, TranslationRecord>(
            r#"
            SELECT id, email_template_id, language_id, subject, html_body, plaintext_body
            FROM email_template_translations
            WHERE email_template_id = $1 AND language_id = $2
            "#,
        )
        .bind(template_id)
        .bind(language_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetTranslationError::TranslationNotFound {
                template_id,
                language_id,
            },
            _ => GetTranslationError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }
}
