//! Mailer module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod attachment;
mod errors;
mod message;
mod recipients;

pub use attachment::Attachment;
pub use errors::MailerError;
pub use message::{ComposedMessage, ContentType};
pub use recipients::Recipients;

/// Dispatches composed messages over a transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send a message
    ///
    /// # Arguments
    /// * `message` - The fully composed [`ComposedMessage`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send(&self, message: &ComposedMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &ComposedMessage) -> Result<(), MailerError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockMailer;
}
