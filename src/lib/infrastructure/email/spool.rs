//! Local spool transport
//!
//! Writes every message as an `.eml` file, for hosts without a mail relay.

use std::path::Path;

use lettre::{AsyncFileTransport, Tokio1Executor};

use crate::domain::communication::mailer::MailerError;

use super::LettreMailer;

/// Writes mail to a spool directory
pub type SpoolMailer = LettreMailer<AsyncFileTransport<Tokio1Executor>>;

impl SpoolMailer {
    /// Spools into `dir`, creating it if needed
    pub fn from_dir(dir: &Path, inline_css: bool) -> Result<Self, MailerError> {
        std::fs::create_dir_all(dir).map_err(|err| {
            MailerError::InvalidConfig(format!("spool directory {}: {}", dir.display(), err))
        })?;

        Ok(Self::new(
            AsyncFileTransport::<Tokio1Executor>::new(dir),
            inline_css,
        ))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::mailer::{ComposedMessage, ContentType, Mailer, Recipients};

    use super::*;

    #[tokio::test]
    async fn test_spools_message_to_file() -> TestResult {
        let dir = std::env::temp_dir().join(format!("mailer-spool-{}", std::process::id()));
        let mailer = SpoolMailer::from_dir(&dir, false)?;

        let message = ComposedMessage {
            from: "noreply@example.com".to_string(),
            to: Recipients::from("ada@example.com"),
            reply_to: None,
            cc: None,
            bcc: None,
            subject: "Spooled".to_string(),
            body: "Hello Ada".to_string(),
            content_type: ContentType::Plaintext,
            attachments: vec![],
        };

        mailer.send(&message).await?;

        let spooled = std::fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "eml"))
            .collect::<Vec<_>>();

        assert_eq!(spooled.len(), 1);

        let contents = std::fs::read_to_string(&spooled[0])?;
        assert!(contents.contains("Subject: Spooled"));
        assert!(contents.contains("Hello Ada"));

        std::fs::remove_dir_all(dir)?;

        Ok(())
    }
}
