//! Clients, staff members and languages that emails are addressed to.

mod client;
mod language;
mod repository;
mod staff;

pub mod errors;

pub use client::Client;
pub use language::Language;
pub use repository::DirectoryRepository;
pub use staff::Staff;

#[cfg(test)]
pub mod tests {
    pub use super::repository::MockDirectoryRepository;
}
