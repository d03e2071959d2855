//! Templated and raw email sending.

mod composer;
mod outgoing;
mod service;

pub mod errors;

pub use composer::TemplateComposer;
pub use outgoing::OutgoingEmail;
pub use service::{EmailService, EmailServiceConfig, EmailServiceImpl};
