//! Common types used across the application.

pub mod money;
pub mod pagination;

pub use money::format_guaranies;
pub use pagination::ListParams;
