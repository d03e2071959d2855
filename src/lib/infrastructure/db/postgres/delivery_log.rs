//! Postgres implementation of the DeliveryLogRepository trait

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    error::ErrorKind::ForeignKeyViolation, query_as, query_scalar, Error::Database, FromRow,
};

use crate::{
    domain::delivery_log::{
        errors::{CreateClientEmailError, GetClientEmailsError},
        ClientEmail, DeliveryLogRepository, NewClientEmail,
    },
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct ClientEmailRecord {
    id: i64,
    client_id: i64,
    subject: String,
    body: String,
    to: String,
    cc: String,
    bcc: String,
    created_at: DateTime<Utc>,
}

impl From<ClientEmailRecord> for ClientEmail {
    fn from(record: ClientEmailRecord) -> Self {
        ClientEmail {
            id: record.id,
            client_id: record.client_id,
            subject: record.subject,
            body: record.body,
            to: record.to,
            cc: record.cc,
            bcc: record.bcc,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl DeliveryLogRepository for PostgresDatabase {
    #[mutants::skip]
    async fn create_client_email(
        &self,
        email: &NewClientEmail,
    ) -> Result<i64, CreateClientEmailError> {
        query_scalar::<_, i64>(
            r#"
            INSERT INTO client_emails (client_id, subject, body, "to", cc, bcc)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(email.client_id)
        .bind(&email.subject)
        .bind(&email.body)
        .bind(&email.to)
        .bind(&email.cc)
        .bind(&email.bcc)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            Database(db_err) => match db_err.kind() {
                ForeignKeyViolation => CreateClientEmailError::ClientNotFound(email.client_id),
                _ => CreateClientEmailError::UnknownError(anyhow!(
                    "Unknown database error: {:?}",
                    db_err
                )),
            },
            _ => CreateClientEmailError::UnknownError(anyhow!("Unknown database error: {:?}", err)),
        })
    }

    #[mutants::skip]
    async fn get_client_emails(
        &self,
        client_id: i64,
    ) -> Result<Vec<ClientEmail>, GetClientEmailsError> {
        let records = query_as::<_, ClientEmailRecord>(
            r#"
            SELECT id, client_id, subject, body, "to", cc, bcc, created_at
            FROM client_emails
            WHERE client_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            GetClientEmailsError::UnknownError(anyhow!("Unknown database error: {:?}", err))
        })?;

        Ok(records.into_iter().map(ClientEmail::from).collect())
    }
}
