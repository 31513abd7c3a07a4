//! Monthly ledger builder.
//!
//! Aggregates a church's worship contributions and expense records for one
//! month and hands the sums to the pure calculator in `tesoreria-core`.
//! Read-only; safe to rebuild at any time.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait,
};

use tesoreria_core::totals::{
    build_monthly_ledger, ExpenseCategory, FundBucket, MonthlyInput, MonthlyLedger, PolicyError,
    ReportSummary, TreasuryPolicy,
};

use crate::entities::{churches, expense_records, reports, worship_contributions, worship_records};

/// Error types for ledger view construction.
#[derive(Debug, thiserror::Error)]
pub enum LedgerViewError {
    /// Month must be between 1 and 12.
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    /// Church not found.
    #[error("Church not found: {0}")]
    ChurchNotFound(i32),

    /// Stored bucket or status name no longer parses.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerViewError> for tesoreria_shared::AppError {
    fn from(err: LedgerViewError) -> Self {
        match err {
            LedgerViewError::InvalidMonth(_) => Self::Validation(err.to_string()),
            LedgerViewError::ChurchNotFound(_) => Self::NotFound(err.to_string()),
            // Stored data no longer parses; not the caller's fault.
            LedgerViewError::Policy(_) => Self::Internal(err.to_string()),
            LedgerViewError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Monthly ledger repository.
#[derive(Debug, Clone)]
pub struct MonthlyLedgerRepository {
    db: DatabaseConnection,
    policy: TreasuryPolicy,
}

impl MonthlyLedgerRepository {
    /// Creates a new monthly ledger repository with the deployment policy.
    #[must_use]
    pub const fn new(db: DatabaseConnection, policy: TreasuryPolicy) -> Self {
        Self { db, policy }
    }

    /// Builds the monthly ledger view for one church and month.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range month, a missing church, or a
    /// database failure.
    pub async fn build(
        &self,
        church_id: i32,
        month: u32,
        year: i32,
    ) -> Result<MonthlyLedger, LedgerViewError> {
        self.build_in(&self.db, church_id, month, year).await
    }

    /// Builds the ledger view inside an existing storage transaction.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build`].
    pub async fn build_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        church_id: i32,
        month: u32,
        year: i32,
    ) -> Result<MonthlyLedger, LedgerViewError> {
        let (start, end) = month_bounds(year, month).ok_or(LedgerViewError::InvalidMonth(month))?;
        let month_key = i32::try_from(month).map_err(|_| LedgerViewError::InvalidMonth(month))?;

        let church = churches::Entity::find_by_id(church_id)
            .one(conn)
            .await?
            .ok_or(LedgerViewError::ChurchNotFound(church_id))?;

        let contributions = worship_contributions::Entity::find()
            .join(
                JoinType::InnerJoin,
                worship_contributions::Relation::WorshipRecords.def(),
            )
            .filter(worship_records::Column::ChurchId.eq(church_id))
            .filter(worship_records::Column::FechaCulto.gte(start))
            .filter(worship_records::Column::FechaCulto.lt(end))
            .all(conn)
            .await?;

        let expenses = expense_records::Entity::find()
            .filter(expense_records::Column::ChurchId.eq(church_id))
            .filter(expense_records::Column::Fecha.gte(start))
            .filter(expense_records::Column::Fecha.lt(end))
            .all(conn)
            .await?;

        let report = reports::Entity::find()
            .filter(reports::Column::ChurchId.eq(church_id))
            .filter(reports::Column::Month.eq(month_key))
            .filter(reports::Column::Year.eq(year))
            .one(conn)
            .await?;

        let (gastos, honorarios_registrados) = split_expenses(&expenses);

        let input = MonthlyInput {
            church_id,
            church_name: church.name,
            month,
            year,
            contribuciones: fold_contributions(&contributions),
            gastos,
            honorarios_registrados,
            report: report.map(summarize_report).transpose()?,
        };

        Ok(build_monthly_ledger(&input, &self.policy))
    }
}

/// Returns the `[first day, first day of next month)` bounds for a month, or
/// `None` when the month is out of range.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

/// Folds contribution rows into per-bucket sums.
fn fold_contributions(
    rows: &[worship_contributions::Model],
) -> BTreeMap<FundBucket, Decimal> {
    let mut sums: BTreeMap<FundBucket, Decimal> = BTreeMap::new();
    for row in rows {
        let bucket: FundBucket = row.fund_bucket.clone().into();
        *sums.entry(bucket).or_default() += row.amount;
    }
    sums
}

/// Splits expense rows into operating sums by category and the pastoral
/// honoraria total.
fn split_expenses(
    rows: &[expense_records::Model],
) -> (BTreeMap<ExpenseCategory, Decimal>, Decimal) {
    let mut operating: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
    let mut honorarios = Decimal::ZERO;

    for row in rows {
        if row.es_honorario_pastoral {
            honorarios += row.monto;
        } else {
            let category: ExpenseCategory = row.categoria.clone().into();
            *operating.entry(category).or_default() += row.monto;
        }
    }

    (operating, honorarios)
}

/// Summarizes an existing reports row for the ledger view.
fn summarize_report(report: reports::Model) -> Result<ReportSummary, PolicyError> {
    let balance_status = report
        .balance_status
        .as_deref()
        .map(str::parse)
        .transpose()?;

    Ok(ReportSummary {
        id: report.id,
        estado: estado_value(&report),
        balance_status,
        closed_at: report.closed_at.map(|t| t.with_timezone(&Utc)),
    })
}

fn estado_value(report: &reports::Model) -> String {
    use sea_orm::ActiveEnum;
    report.estado.to_value()
}

#[cfg(test)]
#[path = "monthly_ledger_tests.rs"]
mod tests;
