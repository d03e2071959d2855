//! Converts composed messages into lettre messages

use anyhow::anyhow;
use css_inline::CSSInliner;
use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    Message,
};

use crate::domain::communication::mailer::{ComposedMessage, ContentType, MailerError};

use super::attachments;

/// Builds the [`Message`] for a [`ComposedMessage`], loading its attachments.
///
/// HTML bodies have their stylesheets inlined when `inline_css` is set.
pub async fn build_message(
    message: &ComposedMessage,
    inline_css: bool,
) -> Result<Message, MailerError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone());

    for address in message.to.iter() {
        builder = builder.to(mailbox(address)?);
    }

    if let Some(reply_to) = &message.reply_to {
        for address in reply_to.iter() {
            builder = builder.reply_to(mailbox(address)?);
        }
    }

    if let Some(cc) = &message.cc {
        for address in cc.iter() {
            builder = builder.cc(mailbox(address)?);
        }
    }

    if let Some(bcc) = &message.bcc {
        for address in bcc.iter() {
            builder = builder.bcc(mailbox(address)?);
        }
    }

    let body = match message.content_type {
        ContentType::Html => SinglePart::html(html_body(&message.body, inline_css)?),
        ContentType::Plaintext => SinglePart::plain(message.body.clone()),
    };

    if message.attachments.is_empty() {
        return Ok(builder.singlepart(body)?);
    }

    let mut parts = MultiPart::mixed().singlepart(body);
    for attachment in &message.attachments {
        parts = parts.singlepart(attachments::resolve(attachment).await?);
    }

    Ok(builder.multipart(parts)?)
}

fn mailbox(address: &str) -> Result<Mailbox, MailerError> {
    address
        .trim()
        .parse()
        .map_err(|_| MailerError::InvalidEmail(address.to_string()))
}

fn html_body(body: &str, inline_css: bool) -> Result<String, MailerError> {
    if !inline_css {
        return Ok(body.to_string());
    }

    CSSInliner::options()
        .load_remote_stylesheets(false)
        .build()
        .inline(body)
        .map_err(|err| MailerError::UnknownError(anyhow!("Could not inline CSS: {}", err)))
}
