//! Global settings exposed to templates as `settings`

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// A stored setting
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setting {
    /// Unique setting slug
    pub slug: String,

    /// The setting's value, HTML-escaped as stored
    pub value: String,

    /// The group the setting belongs to, e.g. `mail`
    pub category: Option<String>,
}

/// The read-only settings bundle handed to every rendered template
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateSettings(Map<String, Value>);

impl TemplateSettings {
    /// Wraps an existing mapping
    pub fn new(settings: Map<String, Value>) -> Self {
        Self(settings)
    }

    /// Builds the bundle from stored settings.
    ///
    /// Each setting is available as `settings.<slug>` and, when categorised,
    /// as `settings.<category>.<slug>`.
    pub fn from_settings(settings: impl IntoIterator<Item = Setting>) -> Self {
        let mut bundle = Map::new();

        for setting in settings {
            if let Some(category) = setting.category {
                let group = bundle
                    .entry(category)
                    .or_insert_with(|| Value::Object(Map::new()));

                if let Value::Object(group) = group {
                    group.insert(setting.slug.clone(), Value::String(setting.value.clone()));
                }
            }

            bundle
                .entry(setting.slug)
                .or_insert(Value::String(setting.value));
        }

        Self(bundle)
    }

    /// The bundle as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum GetSettingsError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Settings store
#[async_trait]
pub trait SettingsRepository: Clone + Send + Sync + 'static {
    /// Load every stored setting
    async fn get_settings(&self) -> Result<Vec<Setting>, GetSettingsError>;
}

#[cfg(test)]
mock! {
    pub SettingsRepository {}

    impl Clone for SettingsRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl SettingsRepository for SettingsRepository {
        async fn get_settings(&self) -> Result<Vec<Setting>, GetSettingsError>;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn setting(slug: &str, value: &str, category: Option<&str>) -> Setting {
        Setting {
            slug: slug.to_string(),
            value: value.to_string(),
            category: category.map(String::from),
        }
    }

    #[test]
    fn test_settings_are_grouped_by_category() {
        let settings = TemplateSettings::from_settings(vec![
            setting("sitename", "Hosting &amp; Co", Some("general")),
            setting("send_emails_from", "noreply@example.com", Some("mail")),
            setting("currency", "USD", None),
        ]);

        assert_eq!(
            settings.to_value(),
            json!({
                "general": {"sitename": "Hosting &amp; Co"},
                "mail": {"send_emails_from": "noreply@example.com"},
                "sitename": "Hosting &amp; Co",
                "send_emails_from": "noreply@example.com",
                "currency": "USD"
            })
        );
    }

    #[test]
    fn test_category_does_not_shadow_setting() {
        let settings = TemplateSettings::from_settings(vec![setting("mail", "x", Some("mail"))]);

        assert_eq!(settings.to_value(), json!({"mail": {"mail": "x"}}));
    }

    #[tokio::test]
    async fn test_settings_bundle_from_repository() -> TestResult {
        let mut repo = MockSettingsRepository::new();

        repo.expect_get_settings()
            .times(1)
            .returning(|| Ok(vec![setting("sitename", "Acme", None)]));

        let settings = TemplateSettings::from_settings(repo.get_settings().await?);

        assert_eq!(settings.to_value(), json!({"sitename": "Acme"}));

        Ok(())
    }
}
