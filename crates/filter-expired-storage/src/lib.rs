//! filter-expired Storage - Access to the user expiry records
//!
//! The filter only ever reads one row per event, so there is no pool:
//! every lookup opens the SQLite file, runs a single query and closes it.

pub mod db;
pub mod repository;

pub use db::UserDatabase;
pub use repository::*;
