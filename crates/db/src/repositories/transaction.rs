//! Transaction poster repository.
//!
//! Posts a single fund transaction atomically: lock the fund row, plan the
//! movement in `tesoreria-core`, then insert the transaction, write the new
//! balance, and append the movement audit row in one storage transaction.
//! Deletion is the mirror operation.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};

use tesoreria_core::posting::{PostingError, PostingOrigin, PostingService};
use tesoreria_shared::types::pagination::ListParams;
use tesoreria_shared::Actor;

use crate::entities::{fund_movements, transactions};

use super::fund::{FundError, FundRepository};
use super::SYSTEM_ACTOR;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(i32),

    /// The actor may not act on the targeted church.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Posting rule violation (amounts, insufficient funds, reversal guard).
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Fund-level failure.
    #[error(transparent)]
    Fund(#[from] FundError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for tesoreria_shared::AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::Forbidden(msg) => Self::Forbidden(msg),
            TransactionError::Posting(
                PostingError::AmbiguousAmounts { .. } | PostingError::NegativeAmount { .. },
            ) => Self::Validation(err.to_string()),
            TransactionError::Posting(_) => Self::BusinessRule(err.to_string()),
            TransactionError::Fund(fund) => fund.into(),
            TransactionError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Input for posting a transaction.
#[derive(Debug, Clone)]
pub struct PostTransactionInput {
    /// The fund to move.
    pub fund_id: i32,
    /// Originating church, when attributable.
    pub church_id: Option<i32>,
    /// Report this posting belongs to, for system-generated sets.
    pub report_id: Option<i32>,
    /// Accounting date.
    pub date: NaiveDate,
    /// Ledger concept line.
    pub concept: String,
    /// Supplier, for expense entries.
    pub provider: Option<String>,
    /// Invoice or receipt number.
    pub document_number: Option<String>,
    /// Credit amount (exclusive with `amount_out`).
    pub amount_in: Decimal,
    /// Debit amount (exclusive with `amount_in`).
    pub amount_out: Decimal,
    /// Who initiated the posting; decides the negative-balance policy.
    pub origin: PostingOrigin,
}

/// Cosmetic fields a posted transaction may still change.
///
/// Amounts, fund, and date are immutable; correcting them means deleting and
/// re-posting.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionDetails {
    /// New concept line.
    pub concept: Option<String>,
    /// New supplier.
    pub provider: Option<String>,
    /// New document number.
    pub document_number: Option<String>,
}

/// Filter options for listing transactions. All filters are additive (AND).
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by church.
    pub church_id: Option<i32>,
    /// Filter by fund.
    pub fund_id: Option<i32>,
    /// Filter by report.
    pub report_id: Option<i32>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Filter by creator identity.
    pub created_by: Option<String>,
}

/// Transaction repository for posting, reversal, and listing.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a user-initiated transaction.
    ///
    /// The fund row is locked before the new balance is computed, so
    /// concurrent postings against the same fund serialize. The transaction
    /// row, the balance write, and the movement row commit or roll back
    /// together.
    ///
    /// # Errors
    ///
    /// Returns an error on authorization failure, posting rule violation
    /// (including insufficient funds), or database failure.
    pub async fn post(
        &self,
        input: PostTransactionInput,
        actor: &Actor,
    ) -> Result<transactions::Model, TransactionError> {
        if let Some(church_id) = input.church_id {
            actor
                .authorize_church(church_id)
                .map_err(|e| TransactionError::Forbidden(e.to_string()))?;
        }

        let txn = self.db.begin().await?;
        let posted = Self::execute(&txn, &input, actor.identity()).await?;
        txn.commit().await?;

        Ok(posted)
    }

    /// Executes a posting inside an existing storage transaction.
    ///
    /// This is the shared kernel: user postings and system-generated report
    /// postings both come through here, differing only in `origin` and
    /// `created_by`.
    ///
    /// # Errors
    ///
    /// Returns an error on posting rule violation or database failure.
    pub async fn execute<C: ConnectionTrait>(
        conn: &C,
        input: &PostTransactionInput,
        created_by: &str,
    ) -> Result<transactions::Model, TransactionError> {
        let fund = FundRepository::lock_for_update(conn, input.fund_id).await?;

        let plan = PostingService::plan_posting(
            fund.current_balance,
            input.amount_in,
            input.amount_out,
            input.origin,
        )?;

        if plan.overdraws() {
            warn!(
                fund = %fund.name,
                new_balance = %plan.new_balance,
                concept = %input.concept,
                origin = ?input.origin,
                "posting leaves fund negative"
            );
        }

        let now = Utc::now().into();
        let posted = transactions::ActiveModel {
            date: Set(input.date),
            church_id: Set(input.church_id),
            report_id: Set(input.report_id),
            fund_id: Set(input.fund_id),
            concept: Set(input.concept.clone()),
            provider: Set(input.provider.clone()),
            document_number: Set(input.document_number.clone()),
            amount_in: Set(input.amount_in),
            amount_out: Set(input.amount_out),
            balance: Set(plan.new_balance),
            created_by: Set(created_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        FundRepository::apply_balance_in(conn, input.fund_id, plan.new_balance).await?;

        fund_movements::ActiveModel {
            fund_id: Set(input.fund_id),
            transaction_id: Set(Some(posted.id)),
            previous_balance: Set(plan.previous_balance),
            movement: Set(plan.movement),
            new_balance: Set(plan.new_balance),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(posted)
    }

    /// Deletes a transaction, reversing its effect on the fund balance.
    ///
    /// The reversal is rejected if it would drive the fund negative: the
    /// credited money has already been spent. The movement log keeps a row
    /// for the reversal with `transaction_id = NULL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing, the actor is not
    /// allowed, the reversal would overdraw, or the database fails.
    pub async fn delete(
        &self,
        transaction_id: i32,
        actor: &Actor,
    ) -> Result<(), TransactionError> {
        let existing = transactions::Entity::find_by_id(transaction_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))?;

        if let Some(church_id) = existing.church_id {
            actor
                .authorize_church(church_id)
                .map_err(|e| TransactionError::Forbidden(e.to_string()))?;
        }

        let txn = self.db.begin().await?;

        let fund = FundRepository::lock_for_update(&txn, existing.fund_id).await?;
        let plan = PostingService::plan_reversal(
            fund.current_balance,
            existing.amount_in,
            existing.amount_out,
        )?;

        transactions::Entity::delete_by_id(transaction_id)
            .exec(&txn)
            .await?;

        FundRepository::apply_balance_in(&txn, existing.fund_id, plan.new_balance).await?;

        fund_movements::ActiveModel {
            fund_id: Set(existing.fund_id),
            transaction_id: Set(None),
            previous_balance: Set(plan.previous_balance),
            movement: Set(plan.movement),
            new_balance: Set(plan.new_balance),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Reverses and deletes every system-generated transaction tied to a
    /// report, inside the caller's storage transaction.
    ///
    /// This is what makes re-closing and report re-submission idempotent:
    /// the previous posting set comes off the ledger before the fresh one
    /// goes on. Reversals here skip the overdraw guard (system origin); a
    /// shortfall is logged and tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn reverse_system_for_report<C: ConnectionTrait>(
        conn: &C,
        report_id: i32,
    ) -> Result<usize, TransactionError> {
        let previous = transactions::Entity::find()
            .filter(transactions::Column::ReportId.eq(report_id))
            .filter(transactions::Column::CreatedBy.eq(SYSTEM_ACTOR))
            .order_by_asc(transactions::Column::Id)
            .all(conn)
            .await?;

        let count = previous.len();

        for existing in previous {
            let fund = FundRepository::lock_for_update(conn, existing.fund_id).await?;
            let plan = PostingService::plan_unchecked_reversal(
                fund.current_balance,
                existing.amount_in,
                existing.amount_out,
            );

            if plan.overdraws() {
                warn!(
                    fund = %fund.name,
                    new_balance = %plan.new_balance,
                    report_id,
                    "reversing report posting leaves fund negative"
                );
            }

            transactions::Entity::delete_by_id(existing.id)
                .exec(conn)
                .await?;

            FundRepository::apply_balance_in(conn, existing.fund_id, plan.new_balance).await?;

            fund_movements::ActiveModel {
                fund_id: Set(existing.fund_id),
                transaction_id: Set(None),
                previous_balance: Set(plan.previous_balance),
                movement: Set(plan.movement),
                new_balance: Set(plan.new_balance),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }

        if count > 0 {
            info!(report_id, count, "reversed prior system postings");
        }

        Ok(count)
    }

    /// Updates the cosmetic allow-list fields of a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing or the actor is not
    /// allowed.
    pub async fn update_details(
        &self,
        transaction_id: i32,
        details: UpdateTransactionDetails,
        actor: &Actor,
    ) -> Result<transactions::Model, TransactionError> {
        let existing = transactions::Entity::find_by_id(transaction_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))?;

        if let Some(church_id) = existing.church_id {
            actor
                .authorize_church(church_id)
                .map_err(|e| TransactionError::Forbidden(e.to_string()))?;
        }

        let mut active: transactions::ActiveModel = existing.into();

        if let Some(concept) = details.concept {
            active.concept = Set(concept);
        }
        if let Some(provider) = details.provider {
            active.provider = Set(Some(provider));
        }
        if let Some(document_number) = details.document_number {
            active.document_number = Set(Some(document_number));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Finds a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn find_by_id(
        &self,
        transaction_id: i32,
    ) -> Result<Option<transactions::Model>, TransactionError> {
        Ok(transactions::Entity::find_by_id(transaction_id)
            .one(&self.db)
            .await?)
    }

    /// Lists transactions with additive filters.
    ///
    /// No default limit: the full history is returned unless the caller
    /// bounds it.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn list(
        &self,
        filter: TransactionFilter,
        params: ListParams,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let mut query = transactions::Entity::find();

        if let Some(church_id) = filter.church_id {
            query = query.filter(transactions::Column::ChurchId.eq(church_id));
        }
        if let Some(fund_id) = filter.fund_id {
            query = query.filter(transactions::Column::FundId.eq(fund_id));
        }
        if let Some(report_id) = filter.report_id {
            query = query.filter(transactions::Column::ReportId.eq(report_id));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::Date.lte(date_to));
        }
        if let Some(created_by) = filter.created_by {
            query = query.filter(transactions::Column::CreatedBy.eq(created_by));
        }

        if let Some(limit) = params.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = params.offset {
            query = query.offset(offset);
        }

        Ok(query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
