//! Fund ledger repository.
//!
//! Owns fund rows and their running balances. Balances are mutated only
//! through the transaction poster, which locks the row first; this module
//! provides the get-or-create, lock, and balance-write primitives it uses.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{fund_movements, funds, sea_orm_active_enums::FundType};

use super::SYSTEM_ACTOR;

/// Error types for fund operations.
#[derive(Debug, thiserror::Error)]
pub enum FundError {
    /// Fund not found by id.
    #[error("Fund not found: {0}")]
    NotFound(i32),

    /// Fund not found by name after an upsert; the row was deleted
    /// concurrently.
    #[error("Fund not found by name: {0}")]
    NotFoundByName(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FundError> for tesoreria_shared::AppError {
    fn from(err: FundError) -> Self {
        match err {
            FundError::NotFound(_) | FundError::NotFoundByName(_) => {
                Self::NotFound(err.to_string())
            }
            FundError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Fund repository for fund rows and balance primitives.
#[derive(Debug, Clone)]
pub struct FundRepository {
    db: DatabaseConnection,
}

impl FundRepository {
    /// Creates a new fund repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Looks up a fund by unique name, creating it with a zero balance if
    /// absent.
    ///
    /// Concurrency-safe: the insert goes through `ON CONFLICT DO NOTHING`
    /// against the unique name constraint and the row is re-read afterwards,
    /// so two concurrent callers for the same name converge on one row. A
    /// check-then-insert would race.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn get_or_create_in<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        fund_type: FundType,
        description: Option<&str>,
    ) -> Result<funds::Model, FundError> {
        let now = Utc::now().into();

        let fund = funds::ActiveModel {
            name: Set(name.to_string()),
            fund_type: Set(fund_type),
            description: Set(description.map(str::to_string)),
            current_balance: Set(Decimal::ZERO),
            is_active: Set(true),
            created_by: Set(SYSTEM_ACTOR.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        funds::Entity::insert(fund)
            .on_conflict(
                OnConflict::column(funds::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        funds::Entity::find()
            .filter(funds::Column::Name.eq(name))
            .one(conn)
            .await?
            .ok_or_else(|| FundError::NotFoundByName(name.to_string()))
    }

    /// Reads a fund row with a `FOR UPDATE` lock.
    ///
    /// Concurrent posters against the same fund serialize on this lock; the
    /// balance read here is the one the movement plan is computed against.
    ///
    /// # Errors
    ///
    /// Returns [`FundError::NotFound`] if the fund does not exist.
    pub async fn lock_for_update<C: ConnectionTrait>(
        conn: &C,
        fund_id: i32,
    ) -> Result<funds::Model, FundError> {
        funds::Entity::find_by_id(fund_id)
            .lock_exclusive()
            .one(conn)
            .await?
            .ok_or(FundError::NotFound(fund_id))
    }

    /// Writes the fund's new balance unconditionally, plus `updated_at`.
    ///
    /// Callers must hold the row lock taken by [`Self::lock_for_update`].
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn apply_balance_in<C: ConnectionTrait>(
        conn: &C,
        fund_id: i32,
        new_balance: Decimal,
    ) -> Result<(), FundError> {
        let fund = funds::ActiveModel {
            id: Set(fund_id),
            current_balance: Set(new_balance),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        fund.update(conn).await?;
        Ok(())
    }

    /// Convenience wrapper over [`Self::get_or_create_in`] outside a
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn get_or_create(
        &self,
        name: &str,
        fund_type: FundType,
        description: Option<&str>,
    ) -> Result<funds::Model, FundError> {
        Self::get_or_create_in(&self.db, name, fund_type, description).await
    }

    /// Finds a fund by id.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn find_by_id(&self, fund_id: i32) -> Result<Option<funds::Model>, FundError> {
        Ok(funds::Entity::find_by_id(fund_id).one(&self.db).await?)
    }

    /// Finds a fund by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<funds::Model>, FundError> {
        Ok(funds::Entity::find()
            .filter(funds::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// Lists active funds ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn list_active(&self) -> Result<Vec<funds::Model>, FundError> {
        Ok(funds::Entity::find()
            .filter(funds::Column::IsActive.eq(true))
            .order_by_asc(funds::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Deactivates a fund. Funds with movement history are never deleted.
    ///
    /// # Errors
    ///
    /// Returns [`FundError::NotFound`] if the fund does not exist.
    pub async fn deactivate(&self, fund_id: i32) -> Result<funds::Model, FundError> {
        let fund = funds::Entity::find_by_id(fund_id)
            .one(&self.db)
            .await?
            .ok_or(FundError::NotFound(fund_id))?;

        let mut active: funds::ActiveModel = fund.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Seeds a fund balance with a manual movement (no transaction row).
    ///
    /// Used for initial balance loading; the movement row keeps the
    /// reconstruction invariant intact with `transaction_id = NULL`.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn seed_balance(&self, fund_id: i32, amount: Decimal) -> Result<(), FundError> {
        let txn = self.db.begin().await?;

        let fund = Self::lock_for_update(&txn, fund_id).await?;
        let new_balance = fund.current_balance + amount;

        Self::apply_balance_in(&txn, fund_id, new_balance).await?;

        let movement = fund_movements::ActiveModel {
            fund_id: Set(fund_id),
            transaction_id: Set(None),
            previous_balance: Set(fund.current_balance),
            movement: Set(amount),
            new_balance: Set(new_balance),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        movement.insert(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
