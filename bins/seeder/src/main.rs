//! Database seeder for development and demos.
//!
//! Seeds a demo church with one month of worship and expense records against
//! an already-migrated database, submits the monthly report, and prints the
//! resulting ledger view.
//!
//! Usage: `cargo run --bin seeder` (database settings come from
//! `config/default.toml` or `TESORERIA__DATABASE__URL`).
//!
//! Expected tables: churches, funds, transactions, fund_movements_enhanced,
//! reports, worship_records, worship_contributions, expense_records.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tesoreria_core::totals::TreasuryPolicy;
use tesoreria_db::entities::{
    expense_records,
    sea_orm_active_enums::{ExpenseCategory, FundBucket},
    worship_contributions, worship_records,
};
use tesoreria_db::repositories::{ChurchRepository, CreateChurchInput, ReportRepository};
use tesoreria_shared::{Actor, AppConfig};

/// Demo month.
const MONTH: u32 = 3;
/// Demo year.
const YEAR: i32 = 2024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tesoreria=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let policy = TreasuryPolicy::from_overrides(
        &config.treasury.remitidos,
        config.treasury.salario_pastoral_tope.map(Decimal::from),
    )
    .context("invalid treasury policy overrides")?;

    let db = tesoreria_db::connect_with(&config.database).await?;
    info!("Connected to database");

    let actor = Actor::Admin {
        email: "seeder@tesoreria.local".to_string(),
    };

    let churches = ChurchRepository::new(db.clone());
    let church = churches
        .create(CreateChurchInput {
            name: "IPU Asunción Central".to_string(),
            city: "Asunción".to_string(),
            pastor: "Juan Benítez".to_string(),
            phone: Some("+595 21 555 0101".to_string()),
        })
        .await?;
    info!(church_id = church.id, "Seeded church");

    seed_worship_month(&db, church.id).await?;
    seed_expenses(&db, church.id).await?;

    let reports = ReportRepository::new(db.clone(), policy);
    let (report, ledger) = reports
        .submit_report(church.id, MONTH, YEAR, &actor)
        .await?;

    info!(
        report_id = report.id,
        status = %ledger.balance.status,
        "Submitted demo report"
    );

    println!("{}", serde_json::to_string_pretty(&ledger)?);
    Ok(())
}

/// Seeds four Sunday services with tithes, offerings, and a missions drive.
async fn seed_worship_month(db: &DatabaseConnection, church_id: i32) -> anyhow::Result<()> {
    // (day, diezmos, misiones); the third Sunday runs the missions drive.
    let sundays: [(u32, i64, i64); 4] = [
        (3, 200_000, 0),
        (10, 225_000, 0),
        (17, 250_000, 150_000),
        (24, 275_000, 0),
    ];

    for (day, diezmos, misiones) in sundays {
        let fecha = NaiveDate::from_ymd_opt(YEAR, MONTH, day)
            .context("invalid demo service date")?;
        let now = Utc::now().into();

        let diezmos = Decimal::from(diezmos);
        let ofrendas = Decimal::from(40_000);
        let misiones = Decimal::from(misiones);

        let record = worship_records::ActiveModel {
            church_id: Set(church_id),
            fecha_culto: Set(fecha),
            tipo_culto: Set(Some("dominical".to_string())),
            total_recaudado: Set(diezmos + ofrendas + misiones),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (bucket, amount) in [
            (FundBucket::Diezmo, diezmos),
            (FundBucket::Ofrenda, ofrendas),
            (FundBucket::Misiones, misiones),
        ] {
            if amount > Decimal::ZERO {
                worship_contributions::ActiveModel {
                    worship_record_id: Set(record.id),
                    donor_id: Set(None),
                    donor_name: Set(None),
                    fund_bucket: Set(bucket),
                    amount: Set(amount),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }

        info!(worship_record_id = record.id, %fecha, "Seeded worship record");
    }

    Ok(())
}

/// Seeds operating expenses plus the pastoral honorarium invoice.
async fn seed_expenses(db: &DatabaseConnection, church_id: i32) -> anyhow::Result<()> {
    let now = Utc::now().into();
    let fecha = NaiveDate::from_ymd_opt(YEAR, MONTH, 28).context("invalid demo expense date")?;

    let entries: [(&str, ExpenseCategory, i64, bool); 3] = [
        ("ANDE - energía eléctrica", ExpenseCategory::ServiciosPublicos, 180_000, false),
        ("Reparación de techo", ExpenseCategory::Mantenimiento, 120_000, false),
        // Matches the month's residual, so the demo report lands balanced.
        ("Honorarios pastorales marzo", ExpenseCategory::Honorarios, 699_000, true),
    ];

    for (concepto, categoria, monto, es_honorario) in entries {
        expense_records::ActiveModel {
            church_id: Set(church_id),
            fecha: Set(fecha),
            concepto: Set(concepto.to_string()),
            categoria: Set(categoria),
            proveedor: Set(None),
            numero_documento: Set(None),
            monto: Set(Decimal::from(monto)),
            es_honorario_pastoral: Set(es_honorario),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    info!(church_id, "Seeded expense records");
    Ok(())
}
