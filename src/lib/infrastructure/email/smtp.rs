//! SMTP transport

use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, Tokio1Executor,
};

use crate::domain::communication::mailer::MailerError;

use super::{LettreMailer, SmtpConfig};

/// Delivers mail over SMTP
pub type SmtpMailer = LettreMailer<AsyncSmtpTransport<Tokio1Executor>>;

impl SmtpMailer {
    /// Builds the SMTP transport.
    ///
    /// `ssl` selects implicit TLS, otherwise the connection is upgraded with
    /// STARTTLS when the server offers it. Credentials are only sent when a
    /// username is configured.
    ///
    /// Must be called inside a Tokio runtime: the connection pool is spawned
    /// on it.
    pub fn from_config(config: &SmtpConfig, inline_css: bool) -> Result<Self, MailerError> {
        let tls_parameters = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|err| MailerError::InvalidConfig(err.to_string()))?;

        let tls = if config.ssl {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self::new(builder.build(), inline_css))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_from_config_with_credentials_and_ssl() -> TestResult {
        let config = SmtpConfig {
            host: "mail.example.com".to_string(),
            port: 465,
            username: "mailer".to_string(),
            password: "secret".to_string(),
            ssl: true,
            verify_tls: true,
        };

        let mailer = SmtpMailer::from_config(&config, true)?;

        assert!(format!("{:?}", mailer).contains("AsyncSmtpTransport"));

        Ok(())
    }
}
