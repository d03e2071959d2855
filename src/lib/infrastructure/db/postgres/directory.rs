//! Postgres implementation of the DirectoryRepository trait

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{query_as, Error::RowNotFound, FromRow};

use crate::{
    domain::directory::{
        errors::{GetClientError, GetLanguageError, GetStaffError},
        Client, DirectoryRepository, Language, Staff,
    },
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct ClientRecord {
    id: i64,
    first_name: String,
    last_name: String,
    company: Option<String>,
    email: String,
    html_emails: Option<String>,
    language_id: i64,
}

impl From<ClientRecord> for Client {
    fn from(record: ClientRecord) -> Self {
        Client {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            company: record.company,
            email: record.email,
            html_emails: record.html_emails,
            language_id: record.language_id,
        }
    }
}

#[derive(FromRow)]
struct StaffRecord {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    language: Option<String>,
}

impl From<StaffRecord> for Staff {
    fn from(record: StaffRecord) -> Self {
        Staff {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            language: record.language,
        }
    }
}

#[derive(FromRow)]
struct LanguageRecord {
    id: i64,
    slug: String,
    name: String,
}

impl From<LanguageRecord> for Language {
    fn from(record: LanguageRecord) -> Self {
        Language {
            id: record.id,
            slug: record.slug,
            name: record.name,
        }
    }
}

#[async_trait]
impl DirectoryRepository for PostgresDatabase {
    #[mutants::skip]
    async fn get_client_by_id(&self, id: i64) -> Result<Client, GetClientError> {
        Ok(query_as::<_, ClientRecord>(
            r#"
            SELECT id, first_name, last_name, company, email, html_emails, language_id
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetClientError::ClientNotFound(id),
            _ => GetClientError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }

    #[mutants::skip]
    async fn get_staff_by_id(&self, id: i64) -> Result<Staff, GetStaffError> {
        Ok(query_as::<_, StaffRecord>(
            r#"
            SELECT id, first_name, last_name, email, language
            FROM staff
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetStaffError::StaffNotFound(id),
            _ => GetStaffError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }

    #[mutants::skip]
    async fn get_language_by_slug(&self, slug: &str) -> Result<Language, GetLanguageError> {
        Ok(query_as::<_, LanguageRecord>(
            r#"
            SELECT id, slug, name
            FROM languages
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            RowNotFound => GetLanguageError::LanguageNotFound(slug.to_string()),
            _ => GetLanguageError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })?
        .into())
    }
}
