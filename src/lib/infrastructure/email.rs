//! Mail transports
//!
//! Every transport shares the same message building through [`LettreMailer`];
//! [`ConfiguredMailer`] picks one from [`MailConfig`] at start-up.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use lettre::AsyncTransport;
use tracing::info;

use crate::domain::communication::mailer::{ComposedMessage, Mailer, MailerError};

mod attachments;
mod config;
mod message;
mod sendmail;
mod smtp;
mod spool;

pub use config::{MailConfig, SmtpConfig, TransportKind};
pub use message::build_message;
pub use sendmail::SendmailMailer;
pub use smtp::SmtpMailer;
pub use spool::SpoolMailer;

/// A [`Mailer`] backed by a lettre transport
pub struct LettreMailer<T> {
    transport: Arc<T>,
    inline_css: bool,
}

impl<T> LettreMailer<T> {
    /// Wraps a transport; `inline_css` moves stylesheet rules of HTML bodies
    /// into `style` attributes before sending.
    pub fn new(transport: T, inline_css: bool) -> Self {
        Self {
            transport: Arc::new(transport),
            inline_css,
        }
    }
}

impl<T> Clone for LettreMailer<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            inline_css: self.inline_css,
        }
    }
}

impl<T> fmt::Debug for LettreMailer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LettreMailer")
            .field("transport", &std::any::type_name::<T>())
            .field("inline_css", &self.inline_css)
            .finish()
    }
}

#[async_trait]
impl<T> Mailer for LettreMailer<T>
where
    T: AsyncTransport + Send + Sync + 'static,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    async fn send(&self, message: &ComposedMessage) -> Result<(), MailerError> {
        let email = build_message(message, self.inline_css).await?;

        self.transport
            .send(email)
            .await
            .map_err(|err| MailerError::SendError(err.into()))?;

        Ok(())
    }
}

/// The transport selected by configuration
#[derive(Clone, Debug)]
pub enum ConfiguredMailer {
    /// Deliver over SMTP
    Smtp(SmtpMailer),

    /// Hand messages to the local sendmail binary
    Sendmail(SendmailMailer),

    /// Write messages to the local spool directory
    Spool(SpoolMailer),
}

impl ConfiguredMailer {
    /// Builds the transport named by `config`.
    ///
    /// Must be called inside a Tokio runtime, which the SMTP transport's
    /// connection pool runs on.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailerError> {
        let mailer = match config.transport_kind() {
            TransportKind::Smtp => {
                info!(
                    "sending mail via SMTP {}:{}",
                    config.smtp.host, config.smtp.port
                );
                Self::Smtp(SmtpMailer::from_config(&config.smtp, config.inline_css)?)
            }
            TransportKind::Sendmail => {
                info!("sending mail via {}", config.sendmail_path);
                Self::Sendmail(SendmailMailer::from_path(
                    &config.sendmail_path,
                    config.inline_css,
                ))
            }
            TransportKind::Spool => {
                info!("spooling mail to {}", config.spool_dir.display());
                Self::Spool(SpoolMailer::from_dir(&config.spool_dir, config.inline_css)?)
            }
        };

        Ok(mailer)
    }
}

#[async_trait]
impl Mailer for ConfiguredMailer {
    async fn send(&self, message: &ComposedMessage) -> Result<(), MailerError> {
        match self {
            Self::Smtp(mailer) => mailer.send(message).await,
            Self::Sendmail(mailer) => mailer.send(message).await,
            Self::Spool(mailer) => mailer.send(message).await,
        }
    }
}
