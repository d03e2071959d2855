//! HTML entity decoding for stored template content

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref SPECIAL_CHAR_ENTITY: Regex =
        Regex::new(r"&(amp|quot|lt|gt|#0*39|#[xX]0*27);").unwrap();
}

/// Decodes the entities produced by escaping HTML special characters
/// (`&amp;`, `&quot;`, `&#039;`, `&lt;`, `&gt;`).
///
/// Decoding is a single pass, so `&amp;lt;` becomes `&lt;`. Other named
/// entities are left untouched.
pub fn decode_html_entities(raw: &str) -> Cow<'_, str> {
    SPECIAL_CHAR_ENTITY.replace_all(raw, |caps: &Captures<'_>| match &caps[1] {
        "amp" => "&",
        "quot" => "\"",
        "lt" => "<",
        "gt" => ">",
        _ => "'",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_special_characters() {
        assert_eq!(
            decode_html_entities("&lt;p class=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/p&gt;"),
            "<p class=\"x\">Tom & Jerry's</p>"
        );
    }

    #[test]
    fn test_decoding_is_single_pass() {
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_other_entities_are_untouched() {
        assert_eq!(decode_html_entities("&copy; 2024"), "&copy; 2024");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_html_entities("hello"), Cow::Borrowed("hello")));
    }
}
