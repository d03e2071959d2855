//! Domain layer: templates, recipients, delivery log and the email service

pub mod communication;
pub mod delivery_log;
pub mod directory;
pub mod templates;
