//! Report repository: the period closer and the report auto-transaction
//! generator.
//!
//! Both entry points share one path: upsert the reports row for the period,
//! reverse every prior system-generated transaction tied to it, then post
//! the freshly planned transfer set — all inside one storage transaction.
//! The reversal step is what makes re-closing and re-submission idempotent.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::info;

use tesoreria_core::closing::{
    ensure_closable, plan_close_transfers, plan_report_postings, CloseRejection, PlannedTransfer,
};
use tesoreria_core::posting::PostingOrigin;
use tesoreria_core::totals::{BalanceStatus, FundBucket, MonthlyLedger, TreasuryPolicy};
use tesoreria_shared::Actor;

use crate::entities::{
    reports,
    sea_orm_active_enums::ReportStatus,
};

use super::fund::{FundError, FundRepository};
use super::monthly_ledger::{LedgerViewError, MonthlyLedgerRepository};
use super::transaction::{PostTransactionInput, TransactionError, TransactionRepository};
use super::SYSTEM_ACTOR;

/// Error types for report and closing operations.
#[derive(Debug, thiserror::Error)]
pub enum ClosingError {
    /// The actor may not act on the targeted church.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The period is not closable in its current state.
    #[error(transparent)]
    NotClosable(#[from] CloseRejection),

    /// Report not found.
    #[error("Report not found: {0}")]
    ReportNotFound(i32),

    /// Ledger view failure (bad month, missing church).
    #[error(transparent)]
    LedgerView(#[from] LedgerViewError),

    /// Posting failure while generating fund transactions.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Fund resolution failure.
    #[error(transparent)]
    Fund(#[from] FundError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClosingError> for tesoreria_shared::AppError {
    fn from(err: ClosingError) -> Self {
        match err {
            ClosingError::Forbidden(msg) => Self::Forbidden(msg),
            ClosingError::NotClosable(rejection) => Self::BusinessRule(format!(
                "{} Sugerencias: {}",
                rejection.mensaje,
                rejection.sugerencias.join(" | ")
            )),
            ClosingError::ReportNotFound(_) => Self::NotFound(err.to_string()),
            ClosingError::LedgerView(inner) => inner.into(),
            ClosingError::Transaction(inner) => inner.into(),
            ClosingError::Fund(inner) => inner.into(),
            ClosingError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Result of a successful period close.
#[derive(Debug, Clone)]
pub struct ClosedPeriod {
    /// The upserted reports row id.
    pub report_id: i32,
    /// The classification the period closed under.
    pub status: BalanceStatus,
    /// The ledger view re-read after commit.
    pub ledger: MonthlyLedger,
}

/// Report repository: period close, auto-transactions, lifecycle.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
    ledger: MonthlyLedgerRepository,
}

impl ReportRepository {
    /// Creates a new report repository with the deployment policy.
    #[must_use]
    pub fn new(db: DatabaseConnection, policy: TreasuryPolicy) -> Self {
        let ledger = MonthlyLedgerRepository::new(db.clone(), policy);
        Self { db, ledger }
    }

    /// Closes a church's month.
    ///
    /// Rebuilds the ledger view, checks closability (`force` overrides only
    /// deficit/surplus), then — in one storage transaction — upserts the
    /// reports row, reverses any prior system postings for it, and posts the
    /// national levy plus one credit per designated bucket. Any failure
    /// rolls the whole close back.
    ///
    /// Closing twice is idempotent: the second close reverses the first
    /// close's postings before re-posting the identical set.
    ///
    /// # Errors
    ///
    /// Returns [`ClosingError::NotClosable`] with the status message and
    /// remediation suggestions when the month is not closable; other
    /// variants on authorization, posting, or database failure.
    pub async fn close_period(
        &self,
        church_id: i32,
        month: u32,
        year: i32,
        force: bool,
        actor: &Actor,
    ) -> Result<ClosedPeriod, ClosingError> {
        actor
            .authorize_church(church_id)
            .map_err(|e| ClosingError::Forbidden(e.to_string()))?;

        let ledger = self.ledger.build(church_id, month, year).await?;
        ensure_closable(&ledger, force)?;

        let txn = self.db.begin().await?;

        let now = Utc::now().into();
        let identity = actor.identity().to_string();
        let report = upsert_report_in(&txn, &ledger, |active| {
            active.estado = Set(ReportStatus::Procesado);
            active.closed_at = Set(Some(now));
            active.closed_by = Set(Some(identity.clone()));
            active.processed_at = Set(Some(now));
            active.processed_by = Set(Some(identity.clone()));
        })
        .await?;

        TransactionRepository::reverse_system_for_report(&txn, report.id).await?;

        let transfers = plan_close_transfers(&ledger);
        post_transfers(&txn, report.id, church_id, &transfers).await?;

        txn.commit().await?;

        info!(
            church_id,
            month,
            year,
            report_id = report.id,
            status = %ledger.balance.status,
            transfers = transfers.len(),
            "period closed"
        );

        let final_ledger = self.ledger.build(church_id, month, year).await?;

        Ok(ClosedPeriod {
            report_id: report.id,
            status: ledger.balance.status,
            ledger: final_ledger,
        })
    }

    /// Creates or refreshes a church's monthly report outside the formal
    /// close, regenerating its fund transactions.
    ///
    /// The posting set adds the operating flows to the close transfers: the
    /// month's entradas into the church operating fund, pastoral honoraria
    /// and operating costs out of it. No closability gate applies — a
    /// submitted declaration is accepted even while unbalanced, and a
    /// resulting negative fund balance is logged rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error on authorization, posting, or database failure.
    pub async fn submit_report(
        &self,
        church_id: i32,
        month: u32,
        year: i32,
        actor: &Actor,
    ) -> Result<(reports::Model, MonthlyLedger), ClosingError> {
        actor
            .authorize_church(church_id)
            .map_err(|e| ClosingError::Forbidden(e.to_string()))?;

        let ledger = self.ledger.build(church_id, month, year).await?;

        let txn = self.db.begin().await?;

        let now = Utc::now().into();
        let identity = actor.identity().to_string();
        let report = upsert_report_in(&txn, &ledger, |active| {
            active.estado = Set(ReportStatus::Pendiente);
            active.submitted_at = Set(Some(now));
            active.submitted_by = Set(Some(identity.clone()));
        })
        .await?;

        TransactionRepository::reverse_system_for_report(&txn, report.id).await?;

        let postings = plan_report_postings(&ledger);
        post_transfers(&txn, report.id, church_id, &postings).await?;

        txn.commit().await?;

        info!(
            church_id,
            month,
            year,
            report_id = report.id,
            postings = postings.len(),
            "report submitted"
        );

        let final_ledger = self.ledger.build(church_id, month, year).await?;
        let report = reports::Entity::find_by_id(report.id)
            .one(&self.db)
            .await?
            .ok_or(ClosingError::ReportNotFound(report.id))?;

        Ok((report, final_ledger))
    }

    /// Deletes a report, re-opening its period.
    ///
    /// Reverses every system-generated transaction tied to the report, then
    /// marks the row `eliminado` and clears the closing fields. The row is
    /// kept for the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the report is missing or the actor is not
    /// allowed.
    pub async fn delete_report(&self, report_id: i32, actor: &Actor) -> Result<(), ClosingError> {
        let report = reports::Entity::find_by_id(report_id)
            .one(&self.db)
            .await?
            .ok_or(ClosingError::ReportNotFound(report_id))?;

        actor
            .authorize_church(report.church_id)
            .map_err(|e| ClosingError::Forbidden(e.to_string()))?;

        let txn = self.db.begin().await?;

        TransactionRepository::reverse_system_for_report(&txn, report_id).await?;

        let mut active: reports::ActiveModel = report.into();
        active.estado = Set(ReportStatus::Eliminado);
        active.closed_at = Set(None);
        active.closed_by = Set(None);
        active.balance_status = Set(None);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;

        info!(report_id, "report deleted; period re-opened");
        Ok(())
    }

    /// Approves or rejects a submitted report. National administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`ClosingError::Forbidden`] for non-admin actors and
    /// [`ClosingError::ReportNotFound`] for missing reports.
    pub async fn review_report(
        &self,
        report_id: i32,
        approved: bool,
        actor: &Actor,
    ) -> Result<reports::Model, ClosingError> {
        if !actor.is_admin() {
            return Err(ClosingError::Forbidden(
                "solo la tesorería nacional puede aprobar o rechazar informes".to_string(),
            ));
        }

        let report = reports::Entity::find_by_id(report_id)
            .one(&self.db)
            .await?
            .ok_or(ClosingError::ReportNotFound(report_id))?;

        let mut active: reports::ActiveModel = report.into();
        active.estado = Set(if approved {
            ReportStatus::Aprobado
        } else {
            ReportStatus::Rechazado
        });
        active.processed_at = Set(Some(Utc::now().into()));
        active.processed_by = Set(Some(actor.identity().to_string()));
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Finds the reports row for one church and period.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn find_by_period(
        &self,
        church_id: i32,
        month: u32,
        year: i32,
    ) -> Result<Option<reports::Model>, ClosingError> {
        let month_key =
            i32::try_from(month).map_err(|_| LedgerViewError::InvalidMonth(month))?;

        Ok(reports::Entity::find()
            .filter(reports::Column::ChurchId.eq(church_id))
            .filter(reports::Column::Month.eq(month_key))
            .filter(reports::Column::Year.eq(year))
            .one(&self.db)
            .await?)
    }
}

/// Upserts the reports row for the ledger's period.
///
/// The `(church_id, month, year)` key is unique; an existing row is updated
/// in place so re-closing or re-submitting never duplicates the period.
async fn upsert_report_in<C, F>(
    conn: &C,
    ledger: &MonthlyLedger,
    set_lifecycle: F,
) -> Result<reports::Model, ClosingError>
where
    C: ConnectionTrait,
    F: FnOnce(&mut reports::ActiveModel),
{
    let month_key = i32::try_from(ledger.month)
        .map_err(|_| LedgerViewError::InvalidMonth(ledger.month))?;

    let existing = reports::Entity::find()
        .filter(reports::Column::ChurchId.eq(ledger.church_id))
        .filter(reports::Column::Month.eq(month_key))
        .filter(reports::Column::Year.eq(ledger.year))
        .one(conn)
        .await?;

    let now = Utc::now().into();
    let is_update = existing.is_some();

    let mut active = match existing {
        Some(report) => report.into(),
        None => reports::ActiveModel {
            church_id: Set(ledger.church_id),
            month: Set(month_key),
            year: Set(ledger.year),
            estado: Set(ReportStatus::Pendiente),
            created_at: Set(now),
            ..Default::default()
        },
    };

    apply_ledger_totals(&mut active, ledger);
    active.updated_at = Set(now);
    set_lifecycle(&mut active);

    let saved = if is_update {
        active.update(conn).await?
    } else {
        active.insert(conn).await?
    };

    Ok(saved)
}

/// Copies the calculated totals from the ledger view onto the reports row.
fn apply_ledger_totals(active: &mut reports::ActiveModel, ledger: &MonthlyLedger) {
    let designado =
        |bucket: FundBucket| -> Decimal {
            ledger
                .entradas
                .designados
                .get(&bucket)
                .copied()
                .unwrap_or_default()
        };

    active.diezmos = Set(ledger.entradas.diezmos);
    active.ofrendas = Set(ledger.entradas.ofrendas);
    active.anexos = Set(ledger.entradas.anexos);
    active.otros = Set(ledger.entradas.otros);
    active.misiones = Set(designado(FundBucket::Misiones));
    active.lazos_amor = Set(designado(FundBucket::LazosAmor));
    active.mision_posible = Set(designado(FundBucket::MisionPosible));
    active.apy = Set(designado(FundBucket::Apy));
    active.instituto_biblico = Set(designado(FundBucket::InstitutoBiblico));
    active.diezmo_pastoral = Set(designado(FundBucket::DiezmoPastoral));
    active.caballeros = Set(designado(FundBucket::Caballeros));
    active.total_entradas = Set(ledger.entradas.total);
    active.fondo_nacional = Set(ledger.distribucion.fondo_nacional_total);
    active.honorarios_pastoral = Set(ledger.gastos.honorarios_registrados);
    active.gastos_operativos = Set(ledger.gastos.operativos);
    active.total_salidas = Set(ledger.gastos.total_salidas);
    active.saldo_mes = Set(ledger.balance.saldo_calculado);
    active.balance_status = Set(Some(ledger.balance.status.as_str().to_string()));
    active.balance_delta = Set(ledger.balance.saldo_calculado);
}

/// Resolves each planned transfer's fund and posts it with system origin.
async fn post_transfers<C: ConnectionTrait>(
    conn: &C,
    report_id: i32,
    church_id: i32,
    transfers: &[PlannedTransfer],
) -> Result<(), ClosingError> {
    let date = Utc::now().date_naive();

    for transfer in transfers {
        let fund = FundRepository::get_or_create_in(
            conn,
            &transfer.fund_name,
            transfer.fund_type.into(),
            None,
        )
        .await?;

        TransactionRepository::execute(
            conn,
            &PostTransactionInput {
                fund_id: fund.id,
                church_id: Some(church_id),
                report_id: Some(report_id),
                date,
                concept: transfer.concept.clone(),
                provider: None,
                document_number: None,
                amount_in: transfer.amount_in,
                amount_out: transfer.amount_out,
                origin: PostingOrigin::System,
            },
            SYSTEM_ACTOR,
        )
        .await?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
