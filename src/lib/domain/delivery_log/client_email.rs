//! Client email log entry

use chrono::{DateTime, Utc};

use crate::domain::communication::mailer::{ComposedMessage, Recipients};

/// A sent email to be logged against a client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClientEmail {
    /// The client the email was sent to
    pub client_id: i64,

    /// The subject as sent
    pub subject: String,

    /// The body as sent
    pub body: String,

    /// The recipient addresses, comma separated
    pub to: String,

    /// The CC addresses, comma separated, or empty
    pub cc: String,

    /// The BCC addresses, comma separated, or empty
    pub bcc: String,
}

impl NewClientEmail {
    /// Records the addressing and content of a sent message
    pub fn new(client_id: i64, message: &ComposedMessage) -> Self {
        let joined = |recipients: &Option<Recipients>| {
            recipients
                .as_ref()
                .map(Recipients::joined)
                .unwrap_or_default()
        };

        Self {
            client_id,
            subject: message.subject.clone(),
            body: message.body.clone(),
            to: message.to.joined(),
            cc: joined(&message.cc),
            bcc: joined(&message.bcc),
        }
    }
}

/// A logged email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientEmail {
    /// Log entry ID
    pub id: i64,

    /// The client the email was sent to
    pub client_id: i64,

    /// The subject as sent
    pub subject: String,

    /// The body as sent
    pub body: String,

    /// The recipient addresses
    pub to: String,

    /// The CC addresses
    pub cc: String,

    /// The BCC addresses
    pub bcc: String,

    /// When the email was logged
    pub created_at: DateTime<Utc>,
}
