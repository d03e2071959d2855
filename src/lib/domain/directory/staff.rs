//! Staff model

use serde::Serialize;

/// A staff member
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Staff {
    /// Staff ID
    pub id: i64,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Preferred language slug
    pub language: Option<String>,
}
