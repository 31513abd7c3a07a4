//! Period-close gating and fund-transfer planning.
//!
//! The close itself is executed by the db layer; this module decides whether
//! a month may close and which fund transactions the close (or a manual
//! report submission) must post. Both entry points share one planner, which
//! is what makes re-posting idempotent: the executor reverses the previous
//! system-generated set and posts the freshly planned one.

pub mod plan;
pub mod types;


pub use plan::{
    ensure_closable, plan_close_transfers, plan_report_postings, NATIONAL_FUND, OPERATING_FUND,
};
pub use types::{CloseRejection, FundType, PlannedTransfer};
