//! Shared types, errors, and configuration for the treasury back office.
//!
//! This crate provides common types used across all other crates:
//! - The actor model resolved at the request boundary
//! - Guaraní money formatting helpers
//! - Pagination types for list operations
//! - Application-wide error types
//! - Configuration management

pub mod actor;
pub mod config;
pub mod error;
pub mod types;

pub use actor::Actor;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
