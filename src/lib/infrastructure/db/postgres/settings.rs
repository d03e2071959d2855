//! Postgres implementation of the SettingsRepository trait

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{query_as, FromRow};

use crate::{
    domain::communication::settings::{GetSettingsError, Setting, SettingsRepository},
    infrastructure::db::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct SettingRecord {
    slug: String,
    value: Option<String>,
    category: Option<String>,
}

impl From<SettingRecord> for Setting {
    fn from(record: SettingRecord) -> Self {
        Setting {
            slug: record.slug,
            value: record.value.unwrap_or_default(),
            category: record.category,
        }
    }
}

#[async_trait]
impl SettingsRepository for PostgresDatabase {
    #[mutants::skip]
    async fn get_settings(&self) -> Result<Vec<Setting>, GetSettingsError> {
        let records = query_as::<_, SettingRecord>(
            r#"
            SELECT slug, value, category
            FROM settings
            ORDER BY slug
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| GetSettingsError::UnknownError(anyhow!("Unknown database error: {:?}", err)))?;

        Ok(records.into_iter().map(Setting::from).collect())
    }
}
