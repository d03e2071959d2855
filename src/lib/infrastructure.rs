//! Infrastructure layer: Postgres repositories and mail transports

pub mod db;
pub mod email;
