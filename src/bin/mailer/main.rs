#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line mailer for the application's email templates

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use template_mailer::{
    domain::{
        communication::{
            emails::{EmailService, EmailServiceConfig, EmailServiceImpl, OutgoingEmail},
            mailer::{Attachment, Recipients},
            renderer::TemplateData,
            settings::{SettingsRepository, TemplateSettings},
        },
        delivery_log::DeliveryLogRepository,
        templates::{TemplateIdentifier, DEFAULT_LANGUAGE_ID},
    },
    infrastructure::{
        db::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::{ConfiguredMailer, MailConfig},
    },
};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// The mail configuration
    #[clap(flatten)]
    pub mail: MailConfig,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Mailer commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending database migrations
    Migrate,

    /// List the emails logged against a client
    History {
        /// The client's ID
        #[arg(long)]
        id: i64,
    },

    #[command(flatten)]
    Send(SendCommand),
}

/// Commands that send an email
#[derive(Debug, Subcommand)]
pub enum SendCommand {
    /// Send a template to a client in their language and preferred format
    Client {
        /// The client's ID
        #[arg(long)]
        id: i64,

        /// The template's ID or slug
        #[arg(long)]
        template: String,

        /// Don't record the email in the client's history
        #[arg(long)]
        skip_logging: bool,

        /// Template data and attachments
        #[clap(flatten)]
        payload: Payload,
    },

    /// Send a template to a staff member in their language
    Staff {
        /// The staff member's ID
        #[arg(long)]
        id: i64,

        /// The template's ID or slug
        #[arg(long)]
        template: String,

        /// Template data and attachments
        #[clap(flatten)]
        payload: Payload,
    },

    /// Send a template to arbitrary addresses
    Template {
        /// Comma separated recipients
        #[arg(long, value_delimiter = ',', required = true)]
        to: Vec<String>,

        /// The template's ID or slug
        #[arg(long)]
        template: String,

        /// Send the plain text body instead of the HTML body
        #[arg(long)]
        plaintext: bool,

        /// The preferred language's ID
        #[arg(long, default_value_t = DEFAULT_LANGUAGE_ID)]
        language: i64,

        /// Template data and attachments
        #[clap(flatten)]
        payload: Payload,
    },

    /// Send an email without a stored template
    Raw {
        /// Comma separated recipients
        #[arg(long, value_delimiter = ',', required = true)]
        to: Vec<String>,

        /// The subject, rendered with the data
        #[arg(long)]
        subject: String,

        /// The body, sent as given
        #[arg(long)]
        body: String,

        /// Send as plain text instead of HTML
        #[arg(long)]
        plaintext: bool,

        /// Comma separated carbon copy recipients
        #[arg(long, value_delimiter = ',')]
        cc: Vec<String>,

        /// Comma separated blind carbon copy recipients
        #[arg(long, value_delimiter = ',')]
        bcc: Vec<String>,

        /// Sender address, defaults to SEND_EMAILS_FROM
        #[arg(long)]
        from: Option<String>,

        /// Comma separated reply-to addresses
        #[arg(long, value_delimiter = ',')]
        reply_to: Vec<String>,

        /// Template data and attachments
        #[clap(flatten)]
        payload: Payload,
    },
}

/// Template data and attachments, as JSON
#[derive(Debug, clap::Args)]
pub struct Payload {
    /// Template variables as a JSON object
    #[arg(long, default_value = "{}")]
    data: String,

    /// Attachments as a JSON array of `{"type": "url"|"data", "data": ...}` descriptors
    #[arg(long, default_value = "[]")]
    attachments: String,
}

impl Payload {
    fn parse(&self) -> Result<(TemplateData, Vec<Attachment>)> {
        let data = match serde_json::from_str(&self.data)? {
            Value::Object(map) => map,
            _ => bail!("--data must be a JSON object"),
        };

        Ok((data, serde_json::from_str(&self.attachments)?))
    }
}

fn recipients(addresses: Vec<String>) -> Option<Recipients> {
    if addresses.is_empty() {
        None
    } else {
        Some(Recipients::from(addresses))
    }
}

#[mutants::skip]
async fn history(postgres: &PostgresDatabase, client_id: i64) -> Result<()> {
    for email in postgres.get_client_emails(client_id).await? {
        println!(
            "{} #{} to {}: {}",
            email.created_at.to_rfc3339(),
            email.id,
            email.to,
            email.subject
        );
    }

    Ok(())
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let postgres = Arc::new(PostgresDatabase::new(&args.db.connection_string).await?);

    let command = match args.command {
        Command::Migrate => return postgres.migrate().await,
        Command::History { id } => return history(&postgres, id).await,
        Command::Send(command) => command,
    };

    let settings = TemplateSettings::from_settings(postgres.get_settings().await?);
    let mailer = Arc::new(ConfiguredMailer::from_config(&args.mail)?);

    let emails = EmailServiceImpl::new(
        postgres.clone(),
        postgres.clone(),
        postgres,
        mailer,
        EmailServiceConfig {
            sender: args.mail.send_emails_from.clone(),
            settings,
        },
    );

    let sent = match command {
        SendCommand::Client {
            id,
            template,
            skip_logging,
            payload,
        } => {
            let (data, attachments) = payload.parse()?;

            emails
                .send_template_to_client(
                    id,
                    TemplateIdentifier::parse(&template),
                    data,
                    attachments,
                    skip_logging,
                )
                .await
        }
        SendCommand::Staff {
            id,
            template,
            payload,
        } => {
            let (data, attachments) = payload.parse()?;

            emails
                .send_template_to_staff(id, TemplateIdentifier::parse(&template), data, attachments)
                .await
        }
        SendCommand::Template {
            to,
            template,
            plaintext,
            language,
            payload,
        } => {
            let (data, attachments) = payload.parse()?;
            let to = recipients(to).ok_or_else(|| anyhow!("no recipients"))?;

            emails
                .send_template(
                    to,
                    TemplateIdentifier::parse(&template),
                    !plaintext,
                    data,
                    attachments,
                    language,
                )
                .await
        }
        SendCommand::Raw {
            to,
            subject,
            body,
            plaintext,
            cc,
            bcc,
            from,
            reply_to,
            payload,
        } => {
            let (data, attachments) = payload.parse()?;
            let to = recipients(to).ok_or_else(|| anyhow!("no recipients"))?;

            let email = OutgoingEmail {
                html: !plaintext,
                data,
                cc: recipients(cc),
                bcc: recipients(bcc),
                from,
                attachments,
                reply_to: recipients(reply_to),
                ..OutgoingEmail::new(to, subject, body)
            };

            emails.send_email(email).await
        }
    };

    if !sent {
        bail!("the email was not sent");
    }

    info!("email sent");

    Ok(())
}
