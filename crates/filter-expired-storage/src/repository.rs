//! Repository layer for data access

pub mod expiry;

pub use expiry::{parse_expiry, DbExpiryRepository, ExpiryRepository};
