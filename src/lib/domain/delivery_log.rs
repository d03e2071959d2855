//! Copies of the emails sent to clients.

mod client_email;
mod repository;

pub mod errors;

pub use client_email::{ClientEmail, NewClientEmail};
pub use repository::DeliveryLogRepository;
