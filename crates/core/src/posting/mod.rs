//! Fund posting validation and movement planning.
//!
//! This module implements the decision-making half of the transaction
//! poster: amount validation, movement computation against a fund balance,
//! the negative-balance policy per posting origin, and reversal planning for
//! deletions. The db layer executes these plans inside a storage transaction.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PostingError;
pub use service::PostingService;
pub use types::{MovementPlan, PostingOrigin};
