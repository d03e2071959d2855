//! Composed email message

use super::{Attachment, Recipients};

/// Whether a body is HTML or plain text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    /// `text/html`
    Html,

    /// `text/plain`
    Plaintext,
}

impl ContentType {
    /// HTML when `html` is set, plain text otherwise
    pub fn from_html_flag(html: bool) -> Self {
        if html {
            Self::Html
        } else {
            Self::Plaintext
        }
    }

    /// The MIME type of the body
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Plaintext => "text/plain",
        }
    }
}

/// A fully resolved email, ready to hand to a [`Mailer`](super::Mailer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedMessage {
    /// The sender of the email
    pub from: String,

    /// The recipients of the email
    pub to: Recipients,

    /// Where replies should go
    pub reply_to: Option<Recipients>,

    /// Carbon copy recipients
    pub cc: Option<Recipients>,

    /// Blind carbon copy recipients
    pub bcc: Option<Recipients>,

    /// The subject of the email
    pub subject: String,

    /// The rendered body of the email
    pub body: String,

    /// The body's content type
    pub content_type: ContentType,

    /// Files to attach
    pub attachments: Vec<Attachment>,
}
