//! Composing and dispatching emails.

pub mod emails;
pub mod entities;
pub mod mailer;
pub mod renderer;
pub mod settings;
