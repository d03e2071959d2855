//! Sendmail transport

use lettre::{AsyncSendmailTransport, Tokio1Executor};

use super::LettreMailer;

/// Hands mail to a local sendmail binary
pub type SendmailMailer = LettreMailer<AsyncSendmailTransport<Tokio1Executor>>;

impl SendmailMailer {
    /// Uses the sendmail executable at `path`
    pub fn from_path(path: &str, inline_css: bool) -> Self {
        Self::new(
            AsyncSendmailTransport::<Tokio1Executor>::new_with_command(path),
            inline_css,
        )
    }
}
