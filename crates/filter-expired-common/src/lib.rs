//! filter-expired Common - Shared types and utilities
//!
//! This crate provides the configuration, error types and protocol
//! vocabulary shared across all filter-expired components.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{Phase, ProtocolVersion, SessionContext, Verdict};
