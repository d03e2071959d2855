//! Client model

use serde::Serialize;

/// A client account
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Client {
    /// Client ID
    pub id: i64,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Company name
    pub company: Option<String>,

    /// Email address
    pub email: String,

    /// HTML email preference, `"1"` when HTML is wanted
    pub html_emails: Option<String>,

    /// Preferred language
    pub language_id: i64,
}

impl Client {
    /// Whether the client has opted in to HTML emails
    pub fn wants_html_emails(&self) -> bool {
        self.html_emails.as_deref() == Some("1")
    }
}
