//! Church directory repository.
//!
//! Thin CRUD over the churches table; no treasury logic lives here.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use tesoreria_shared::types::pagination::ListParams;

use crate::entities::churches;

/// Default page size for church listings.
pub const DEFAULT_CHURCH_LIMIT: u64 = 100;

/// Error types for church operations.
#[derive(Debug, thiserror::Error)]
pub enum ChurchError {
    /// Church not found.
    #[error("Church not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ChurchError> for tesoreria_shared::AppError {
    fn from(err: ChurchError) -> Self {
        match err {
            ChurchError::NotFound(_) => Self::NotFound(err.to_string()),
            ChurchError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Input for registering a church.
#[derive(Debug, Clone)]
pub struct CreateChurchInput {
    /// Congregation name.
    pub name: String,
    /// City.
    pub city: String,
    /// Pastor in charge.
    pub pastor: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Filter options for listing churches. All filters are additive (AND).
#[derive(Debug, Clone, Default)]
pub struct ChurchFilter {
    /// Substring match on the name.
    pub name: Option<String>,
    /// Substring match on the city.
    pub city: Option<String>,
    /// Restrict to active churches.
    pub only_active: bool,
}

/// Church repository.
#[derive(Debug, Clone)]
pub struct ChurchRepository {
    db: DatabaseConnection,
}

impl ChurchRepository {
    /// Creates a new church repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a church.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn create(&self, input: CreateChurchInput) -> Result<churches::Model, ChurchError> {
        let now = Utc::now().into();

        let church = churches::ActiveModel {
            name: Set(input.name),
            city: Set(input.city),
            pastor: Set(input.pastor),
            phone: Set(input.phone),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(church.insert(&self.db).await?)
    }

    /// Finds a church by id.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn find_by_id(&self, church_id: i32) -> Result<Option<churches::Model>, ChurchError> {
        Ok(churches::Entity::find_by_id(church_id).one(&self.db).await?)
    }

    /// Lists churches with additive filters, defaulting to 100 rows.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn list(
        &self,
        filter: ChurchFilter,
        params: ListParams,
    ) -> Result<Vec<churches::Model>, ChurchError> {
        let mut query = churches::Entity::find();

        if let Some(name) = filter.name {
            query = query.filter(churches::Column::Name.contains(&name));
        }
        if let Some(city) = filter.city {
            query = query.filter(churches::Column::City.contains(&city));
        }
        if filter.only_active {
            query = query.filter(churches::Column::IsActive.eq(true));
        }

        Ok(query
            .order_by_asc(churches::Column::Name)
            .limit(params.limit_or(DEFAULT_CHURCH_LIMIT))
            .offset(params.offset())
            .all(&self.db)
            .await?)
    }

    /// Updates a church's directory fields.
    ///
    /// # Errors
    ///
    /// Returns [`ChurchError::NotFound`] if the church does not exist.
    pub async fn update(
        &self,
        church_id: i32,
        input: CreateChurchInput,
    ) -> Result<churches::Model, ChurchError> {
        let church = churches::Entity::find_by_id(church_id)
            .one(&self.db)
            .await?
            .ok_or(ChurchError::NotFound(church_id))?;

        let mut active: churches::ActiveModel = church.into();
        active.name = Set(input.name);
        active.city = Set(input.city);
        active.pastor = Set(input.pastor);
        active.phone = Set(input.phone);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deactivates a church, keeping its history.
    ///
    /// # Errors
    ///
    /// Returns [`ChurchError::NotFound`] if the church does not exist.
    pub async fn deactivate(&self, church_id: i32) -> Result<churches::Model, ChurchError> {
        let church = churches::Entity::find_by_id(church_id)
            .one(&self.db)
            .await?
            .ok_or(ChurchError::NotFound(church_id))?;

        let mut active: churches::ActiveModel = church.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }
}
