//! `SeaORM` entity definitions for the treasury schema.

pub mod churches;
pub mod expense_records;
pub mod fund_movements;
pub mod funds;
pub mod reports;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod worship_contributions;
pub mod worship_records;
