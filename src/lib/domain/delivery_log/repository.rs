//! Delivery log repository module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::delivery_log::{
    errors::{CreateClientEmailError, GetClientEmailsError},
    ClientEmail, NewClientEmail,
};

/// Delivery log
#[async_trait]
pub trait DeliveryLogRepository: Clone + Send + Sync + 'static {
    /// Store a copy of an email sent to a client, returning the entry's ID
    async fn create_client_email(&self, email: &NewClientEmail)
        -> Result<i64, CreateClientEmailError>;

    /// The emails logged against a client, newest first
    async fn get_client_emails(&self, client_id: i64)
        -> Result<Vec<ClientEmail>, GetClientEmailsError>;
}

#[cfg(test)]
mock! {
    pub DeliveryLogRepository {}

    impl Clone for DeliveryLogRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl DeliveryLogRepository for DeliveryLogRepository {
        async fn create_client_email(&self, email: &NewClientEmail) -> Result<i64, CreateClientEmailError>;
        async fn get_client_emails(&self, client_id: i64) -> Result<Vec<ClientEmail>, GetClientEmailsError>;
    }
}
