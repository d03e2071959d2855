//! Language model

use serde::Serialize;

/// A language templates can be translated into
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Language ID
    pub id: i64,

    /// Unique slug, e.g. `english`
    pub slug: String,

    /// Display name
    pub name: String,
}
