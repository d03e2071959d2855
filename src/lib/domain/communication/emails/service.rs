//! Email service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::to_value;
use tracing::{debug, info, warn};

use crate::domain::{
    communication::{
        mailer::{Attachment, ComposedMessage, ContentType, Mailer, Recipients},
        renderer::{Renderer, TemplateData, SETTINGS_KEY},
        settings::TemplateSettings,
    },
    delivery_log::{DeliveryLogRepository, NewClientEmail},
    directory::{errors::GetLanguageError, DirectoryRepository, Staff},
    templates::{TemplateIdentifier, TemplateRepository, DEFAULT_LANGUAGE_ID},
};

use super::{errors::EmailError, OutgoingEmail, TemplateComposer};

/// Email service
///
/// Every operation reports a plain success flag; failures are logged and
/// never surface to the caller.
#[async_trait]
pub trait EmailService: Clone + Send + Sync + 'static {
    /// Composes a message from a template and sends it.
    ///
    /// # Arguments
    /// * `to` - The recipients.
    /// * `template` - The template's ID or slug.
    /// * `html` - Whether to send the HTML or the plain text body.
    /// * `data` - Variables for the subject and body.
    /// * `attachments` - Files to attach.
    /// * `language_id` - The preferred language.
    ///
    /// # Returns
    /// `true` if the message was sent.
    async fn send_template(
        &self,
        to: Recipients,
        template: TemplateIdentifier,
        html: bool,
        data: TemplateData,
        attachments: Vec<Attachment>,
        language_id: i64,
    ) -> bool;

    /// Sends a template to a client in their language and format, logging a
    /// copy against the client unless `skip_logging` is set.
    ///
    /// # Returns
    /// `true` if the message was sent and, when required, logged.
    async fn send_template_to_client(
        &self,
        client_id: i64,
        template: TemplateIdentifier,
        data: TemplateData,
        attachments: Vec<Attachment>,
        skip_logging: bool,
    ) -> bool;

    /// Sends a template to a staff member in their language.
    ///
    /// # Returns
    /// `true` if the message was sent.
    async fn send_template_to_staff(
        &self,
        staff_id: i64,
        template: TemplateIdentifier,
        data: TemplateData,
        attachments: Vec<Attachment>,
    ) -> bool;

    /// Sends an email that does not use a stored template.
    ///
    /// # Returns
    /// `true` if the message was sent.
    async fn send_email(&self, email: OutgoingEmail) -> bool;
}

/// Process-wide values every send needs
#[derive(Clone, Debug, Default)]
pub struct EmailServiceConfig {
    /// The default sender address
    pub sender: String,

    /// The settings bundle exposed to templates
    pub settings: TemplateSettings,
}

/// Email service implementation
#[derive(Clone)]
pub struct EmailServiceImpl<T, D, L, M>
where
    T: TemplateRepository,
    D: DirectoryRepository,
    L: DeliveryLogRepository,
    M: Mailer,
{
    composer: TemplateComposer<T>,
    renderer: Renderer,
    directory: Arc<D>,
    delivery_log: Arc<L>,
    mailer: Arc<M>,
    config: EmailServiceConfig,
}

impl<T, D, L, M> EmailServiceImpl<T, D, L, M>
where
    T: TemplateRepository,
    D: DirectoryRepository,
    L: DeliveryLogRepository,
    M: Mailer,
{
    /// Creates a new email service.
    pub fn new(
        templates: Arc<T>,
        directory: Arc<D>,
        delivery_log: Arc<L>,
        mailer: Arc<M>,
        config: EmailServiceConfig,
    ) -> Self {
        let renderer = Renderer::new();

        Self {
            composer: TemplateComposer::new(templates, renderer.clone(), config.sender.clone()),
            renderer,
            directory,
            delivery_log,
            mailer,
            config,
        }
    }

    fn with_settings(&self, mut data: TemplateData) -> TemplateData {
        data.insert(SETTINGS_KEY.to_string(), self.config.settings.to_value());
        data
    }

    async fn dispatch(&self, message: &ComposedMessage) -> Result<(), EmailError> {
        self.mailer.send(message).await?;

        info!("sent \"{}\" to {}", message.subject, message.to.joined());

        Ok(())
    }

    async fn try_send_template(
        &self,
        to: Recipients,
        template: &TemplateIdentifier,
        html: bool,
        data: &TemplateData,
        attachments: Vec<Attachment>,
        language_id: i64,
    ) -> Result<ComposedMessage, EmailError> {
        let message = self
            .composer
            .compose_from_template(to, template, html, data, attachments, language_id)
            .await?;

        self.dispatch(&message).await?;

        Ok(message)
    }

    async fn try_send_template_to_client(
        &self,
        client_id: i64,
        template: &TemplateIdentifier,
        data: TemplateData,
        attachments: Vec<Attachment>,
        skip_logging: bool,
    ) -> Result<(), EmailError> {
        let client = self.directory.get_client_by_id(client_id).await?;

        let mut data = self.with_settings(data);
        data.insert("client".to_string(), to_value(&client)?);

        let message = self
            .try_send_template(
                Recipients::from(client.email.as_str()),
                template,
                client.wants_html_emails(),
                &data,
                attachments,
                client.language_id,
            )
            .await?;

        if skip_logging {
            debug!("not logging email to client {}", client.id);
            return Ok(());
        }

        self.delivery_log
            .create_client_email(&NewClientEmail::new(client.id, &message))
            .await?;

        Ok(())
    }

    async fn try_send_template_to_staff(
        &self,
        staff_id: i64,
        template: &TemplateIdentifier,
        data: TemplateData,
        attachments: Vec<Attachment>,
    ) -> Result<(), EmailError> {
        let staff = self.directory.get_staff_by_id(staff_id).await?;
        let language_id = self.staff_language_id(&staff).await?;

        let mut data = self.with_settings(data);
        data.insert("staff".to_string(), to_value(&staff)?);

        // Staff have no format preference yet.
        self.try_send_template(
            Recipients::from(staff.email.as_str()),
            template,
            true,
            &data,
            attachments,
            language_id,
        )
        .await?;

        Ok(())
    }

    async fn staff_language_id(&self, staff: &Staff) -> Result<i64, EmailError> {
        let Some(slug) = staff.language.as_deref() else {
            return Ok(DEFAULT_LANGUAGE_ID);
        };

        match self.directory.get_language_by_slug(slug).await {
            Ok(language) => Ok(language.id),
            Err(GetLanguageError::LanguageNotFound(_)) => {
                debug!("unknown language {}, using the default", slug);
                Ok(DEFAULT_LANGUAGE_ID)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn try_send_email(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let data = self.with_settings(email.data);

        let message = ComposedMessage {
            from: email.from.unwrap_or_else(|| self.config.sender.clone()),
            to: email.to,
            reply_to: email.reply_to,
            cc: email.cc,
            bcc: email.bcc,
            subject: self.renderer.render(&email.subject, &data),
            body: email.body,
            content_type: ContentType::from_html_flag(email.html),
            attachments: email.attachments,
        };

        self.dispatch(&message).await
    }
}

fn succeeded<V>(result: Result<V, EmailError>, description: fmt::Arguments<'_>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            warn!("could not send {}: {}", description, err);
            false
        }
    }
}

#[async_trait]
impl<T, D, L, M> EmailService for EmailServiceImpl<T, D, L, M>
where
    T: TemplateRepository,
    D: DirectoryRepository,
    L: DeliveryLogRepository,
    M: Mailer,
{
    async fn send_template(
        &self,
        to: Recipients,
        template: TemplateIdentifier,
        html: bool,
        data: TemplateData,
        attachments: Vec<Attachment>,
        language_id: i64,
    ) -> bool {
        let result = self
            .try_send_template(to, &template, html, &data, attachments, language_id)
            .await;

        succeeded(result, format_args!("template {}", template))
    }

    async fn send_template_to_client(
        &self,
        client_id: i64,
        template: TemplateIdentifier,
        data: TemplateData,
        attachments: Vec<Attachment>,
        skip_logging: bool,
    ) -> bool {
        let result = self
            .try_send_template_to_client(client_id, &template, data, attachments, skip_logging)
            .await;

        succeeded(
            result,
            format_args!("template {} to client {}", template, client_id),
        )
    }

    async fn send_template_to_staff(
        &self,
        staff_id: i64,
        template: TemplateIdentifier,
        data: TemplateData,
        attachments: Vec<Attachment>,
    ) -> bool {
        let result = self
            .try_send_template_to_staff(staff_id, &template, data, attachments)
            .await;

        succeeded(
            result,
            format_args!("template {} to staff member {}", template, staff_id),
        )
    }

    async fn send_email(&self, email: OutgoingEmail) -> bool {
        let to = email.to.joined();
        let result = self.try_send_email(email).await;

        succeeded(result, format_args!("email to {}", to))
    }
}

impl<T, D, L, M> fmt::Debug for EmailServiceImpl<T, D, L, M>
where
    T: TemplateRepository,
    D: DirectoryRepository,
    L: DeliveryLogRepository,
    M: Mailer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailServiceImpl")
            .field("templates", &"TemplateRepository")
            .field("directory", &"DirectoryRepository")
            .field("delivery_log", &"DeliveryLogRepository")
            .field("mailer", &"Mailer")
            .field("config", &self.config)
            .finish()
    }
}
