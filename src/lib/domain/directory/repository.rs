//! Directory repository module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::directory::{
    errors::{GetClientError, GetLanguageError, GetStaffError},
    Client, Language, Staff,
};

/// Lookups for the entities emails are sent to
#[async_trait]
pub trait DirectoryRepository: Clone + Send + Sync + 'static {
    /// Get a client by their ID
    async fn get_client_by_id(&self, id: i64) -> Result<Client, GetClientError>;

    /// Get a staff member by their ID
    async fn get_staff_by_id(&self, id: i64) -> Result<Staff, GetStaffError>;

    /// Get a language by its slug
    async fn get_language_by_slug(&self, slug: &str) -> Result<Language, GetLanguageError>;
}

#[cfg(test)]
mock! {
    pub DirectoryRepository {}

    impl Clone for DirectoryRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl DirectoryRepository for DirectoryRepository {
        async fn get_client_by_id(&self, id: i64) -> Result<Client, GetClientError>;
        async fn get_staff_by_id(&self, id: i64) -> Result<Staff, GetStaffError>;
        async fn get_language_by_slug(&self, slug: &str) -> Result<Language, GetLanguageError>;
    }
}
