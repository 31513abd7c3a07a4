//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Multi-step mutations run inside one storage transaction; methods taking a
//! [`sea_orm::ConnectionTrait`] are the in-transaction building blocks.

pub mod church;
pub mod fund;
pub mod monthly_ledger;
pub mod report;
pub mod transaction;

pub use church::{ChurchError, ChurchFilter, ChurchRepository, CreateChurchInput};
pub use fund::{FundError, FundRepository};
pub use monthly_ledger::{LedgerViewError, MonthlyLedgerRepository};
pub use report::{ClosedPeriod, ClosingError, ReportRepository};
pub use transaction::{
    PostTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionDetails,
};

/// Identity recorded on system-generated rows.
pub const SYSTEM_ACTOR: &str = "system";
