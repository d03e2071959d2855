//! Mail configuration

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Which transport delivers mail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportKind {
    /// SMTP relay
    Smtp,

    /// Local sendmail binary
    Sendmail,

    /// Local spool directory, used for any other setting
    Spool,
}

impl TransportKind {
    /// Interprets the configured transport name. Names are matched exactly.
    pub fn from_setting(raw: &str) -> Self {
        match raw {
            "smtp" => Self::Smtp,
            "sendmail" => Self::Sendmail,
            _ => Self::Spool,
        }
    }
}

/// Mail configuration
#[derive(Clone, Debug, Parser)]
pub struct MailConfig {
    /// The transport: `smtp`, `sendmail`, or anything else for the local spool
    #[clap(long = "mail-transport", env = "MAIL_TRANSPORT", default_value = "mail")]
    pub transport: String,

    /// SMTP settings
    #[clap(flatten)]
    pub smtp: SmtpConfig,

    /// The sendmail executable
    #[clap(long, env = "SENDMAIL_PATH", default_value = "/usr/sbin/sendmail")]
    pub sendmail_path: String,

    /// Where the local spool writes messages
    #[clap(long, env = "MAIL_SPOOL_DIR", default_value = "mail")]
    pub spool_dir: PathBuf,

    /// The default sender address
    #[clap(long, env = "SEND_EMAILS_FROM")]
    pub send_emails_from: String,

    /// Inline stylesheet rules into HTML bodies
    #[clap(long, env = "MAIL_INLINE_CSS", default_value = "true", action = ArgAction::Set)]
    pub inline_css: bool,
}

impl MailConfig {
    /// The configured transport
    pub fn transport_kind(&self) -> TransportKind {
        TransportKind::from_setting(&self.transport)
    }
}

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "25")]
    pub port: u16,

    /// The SMTP username, credentials are only sent when it is set
    #[clap(long = "smtp-username", env = "SMTP_USERNAME", default_value = "")]
    pub username: String,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD", default_value = "")]
    pub password: String,

    /// Connect over TLS instead of upgrading with STARTTLS
    #[clap(long = "smtp-ssl", env = "SMTP_SSL")]
    pub ssl: bool,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value = "true", action = ArgAction::Set)]
    pub verify_tls: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_kind_from_setting() {
        assert_eq!(TransportKind::from_setting("smtp"), TransportKind::Smtp);
        assert_eq!(TransportKind::from_setting("SMTP"), TransportKind::Spool);
        assert_eq!(TransportKind::from_setting(" smtp"), TransportKind::Spool);
        assert_eq!(TransportKind::from_setting("sendmail"), TransportKind::Sendmail);
        assert_eq!(TransportKind::from_setting("mail"), TransportKind::Spool);
        assert_eq!(TransportKind::from_setting(""), TransportKind::Spool);
    }

    #[test]
    fn test_parse_from_arguments() {
        let config = MailConfig::parse_from([
            "mailer",
            "--mail-transport",
            "smtp",
            "--smtp-host",
            "mail.example.com",
            "--smtp-port",
            "465",
            "--smtp-ssl",
            "--send-emails-from",
            "noreply@example.com",
            "--inline-css",
            "false",
        ]);

        assert_eq!(config.transport_kind(), TransportKind::Smtp);
        assert_eq!(config.smtp.host, "mail.example.com");
        assert_eq!(config.smtp.port, 465);
        assert!(config.smtp.ssl);
        assert!(config.smtp.verify_tls);
        assert!(!config.inline_css);
        assert_eq!(config.send_emails_from, "noreply@example.com");
    }
}
