//! Raw (untemplated) email

use crate::domain::{
    communication::{
        mailer::{Attachment, Recipients},
        renderer::TemplateData,
    },
    templates::DEFAULT_LANGUAGE_ID,
};

/// An email whose body is supplied ready to send.
///
/// Only the subject goes through the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingEmail {
    /// The recipients
    pub to: Recipients,

    /// Subject template
    pub subject: String,

    /// The final body
    pub body: String,

    /// Send as HTML (the default) or plain text
    pub html: bool,

    /// Data for the subject template
    pub data: TemplateData,

    /// Carbon copy recipients
    pub cc: Option<Recipients>,

    /// Blind carbon copy recipients
    pub bcc: Option<Recipients>,

    /// Sender, defaulting to the configured address
    pub from: Option<String>,

    /// Files to attach
    pub attachments: Vec<Attachment>,

    /// Language of the email; not used for rendering
    pub language_id: i64,

    /// Where replies should go
    pub reply_to: Option<Recipients>,
}

impl OutgoingEmail {
    /// Creates an HTML email with no extra recipients or attachments
    pub fn new(
        to: impl Into<Recipients>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            html: true,
            data: TemplateData::new(),
            cc: None,
            bcc: None,
            from: None,
            attachments: Vec::new(),
            language_id: DEFAULT_LANGUAGE_ID,
            reply_to: None,
        }
    }

    /// Send as plain text
    pub fn plaintext(mut self) -> Self {
        self.html = false;
        self
    }

    /// Data for the subject template
    pub fn with_data(mut self, data: TemplateData) -> Self {
        self.data = data;
        self
    }

    /// Carbon copy recipients
    pub fn with_cc(mut self, cc: impl Into<Recipients>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    /// Blind carbon copy recipients
    pub fn with_bcc(mut self, bcc: impl Into<Recipients>) -> Self {
        self.bcc = Some(bcc.into());
        self
    }

    /// Overrides the sender
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Where replies should go
    pub fn with_reply_to(mut self, reply_to: impl Into<Recipients>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Adds an attachment
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// The language of the email
    pub fn with_language(mut self, language_id: i64) -> Self {
        self.language_id = language_id;
        self
    }
}
