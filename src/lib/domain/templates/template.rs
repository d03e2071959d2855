//! Email template models

use crate::domain::communication::mailer::{ContentType, Recipients};

/// The language whose translation is used when the requested one is missing.
pub const DEFAULT_LANGUAGE_ID: i64 = 1;

/// An email template, as edited by an administrator
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailTemplate {
    /// Template ID
    pub id: i64,

    /// Unique template slug
    pub slug: String,

    /// Comma separated CC addresses, or empty
    pub cc: String,

    /// Comma separated BCC addresses, or empty
    pub bcc: String,
}

impl EmailTemplate {
    /// The recipients to carbon copy, if any
    pub fn cc_recipients(&self) -> Option<Recipients> {
        Recipients::from_address_list(&self.cc)
    }

    /// The recipients to blind carbon copy, if any
    pub fn bcc_recipients(&self) -> Option<Recipients> {
        Recipients::from_address_list(&self.bcc)
    }
}

/// The content of a template in one language
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailTemplateTranslation {
    /// Translation ID
    pub id: i64,

    /// The template this translation belongs to
    pub email_template_id: i64,

    /// The language of this translation
    pub language_id: i64,

    /// Subject template
    pub subject: String,

    /// HTML body template, stored HTML-escaped
    pub html_body: String,

    /// Plain text body template, stored HTML-escaped
    pub plaintext_body: String,
}

impl EmailTemplateTranslation {
    /// The body template for the given content type
    pub fn body(&self, content_type: ContentType) -> &str {
        match content_type {
            ContentType::Html => &self.html_body,
            ContentType::Plaintext => &self.plaintext_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cc_list_is_split_on_commas() {
        let template = EmailTemplate {
            cc: "a@x.com,b@x.com".to_string(),
            ..Default::default()
        };

        assert_eq!(
            template.cc_recipients(),
            Some(Recipients::List(vec![
                "a@x.com".to_string(),
                "b@x.com".to_string()
            ]))
        );
    }

    #[test]
    fn test_single_cc_is_not_a_list() {
        let template = EmailTemplate {
            cc: "a@x.com".to_string(),
            ..Default::default()
        };

        assert_eq!(
            template.cc_recipients(),
            Some(Recipients::Single("a@x.com".to_string()))
        );
    }

    #[test]
    fn test_empty_bcc_is_unset() {
        assert_eq!(EmailTemplate::default().bcc_recipients(), None);
    }

    #[test]
    fn test_body_selection() {
        let translation = EmailTemplateTranslation {
            html_body: "<p>hi</p>".to_string(),
            plaintext_body: "hi".to_string(),
            ..Default::default()
        };

        assert_eq!(translation.body(ContentType::Html), "<p>hi</p>");
        assert_eq!(translation.body(ContentType::Plaintext), "hi");
    }
}
