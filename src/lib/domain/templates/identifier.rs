//! Template identifier

use std::{convert::Infallible, fmt, str::FromStr};

/// Identifies a template either by its numeric ID or by its slug.
///
/// The distinction is purely syntactic: anything that parses as an integer is
/// treated as an ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TemplateIdentifier {
    /// The template's numeric ID
    Id(i64),

    /// The template's unique slug
    Slug(String),
}

impl TemplateIdentifier {
    /// Parses a raw identifier, preferring the numeric form.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Slug(raw.to_string()),
        }
    }
}

impl FromStr for TemplateIdentifier {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl From<i64> for TemplateIdentifier {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TemplateIdentifier {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for TemplateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Slug(slug) => write!(f, "{slug}"),
        }
    }
}
