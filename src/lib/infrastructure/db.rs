//! Database implementations of the domain repositories

pub mod postgres;
