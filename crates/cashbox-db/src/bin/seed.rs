//! # Seed Data Generator
//!
//! Populates the database with the Brazilian real denominations.
//!
//! ## Usage
//! ```bash
//! # Seed ./cashbox.db (or $CASHBOX_DB_PATH)
//! cargo run -p cashbox-db --bin seed
//!
//! # Specify database path and policy
//! cargo run -p cashbox-db --bin seed -- --db ./data/cashbox.db --policy allow_deficit
//! ```
//!
//! ## Generated Denominations
//! Seven bills (R$200 down to R$2) and five coins (R$1 down to R$0.05),
//! with ids 1..=12 in that order so every install agrees on them.
//! An opening float is stocked for each.

use cashbox_core::{Denomination, DenominationKind, Money, QuantityPolicy};
use cashbox_db::{CashboxConfig, Database, DbResult, DenominationRepository};
use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// (face value in cents, kind, opening quantity, label)
const BRL_DENOMINATIONS: &[(i64, DenominationKind, i64, &str)] = &[
    (20000, DenominationKind::Bill, 0, "200 reais"),
    (10000, DenominationKind::Bill, 2, "100 reais"),
    (5000, DenominationKind::Bill, 4, "50 reais"),
    (2000, DenominationKind::Bill, 10, "20 reais"),
    (1000, DenominationKind::Bill, 10, "10 reais"),
    (500, DenominationKind::Bill, 20, "5 reais"),
    (200, DenominationKind::Bill, 20, "2 reais"),
    (100, DenominationKind::Coin, 50, "1 real"),
    (50, DenominationKind::Coin, 50, "50 centavos"),
    (25, DenominationKind::Coin, 50, "25 centavos"),
    (10, DenominationKind::Coin, 50, "10 centavos"),
    (5, DenominationKind::Coin, 50, "5 centavos"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = CashboxConfig::from_env()?;

    // Command line beats environment
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--policy" | "-p" => {
                if i + 1 < args.len() {
                    config.quantity_policy = args[i + 1].parse::<QuantityPolicy>()?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cashbox Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./cashbox.db)");
                println!("  -p, --policy <POLICY>  reject | allow_deficit (default: reject)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(
        path = %config.database_path.display(),
        policy = %config.quantity_policy,
        "Seeding cashbox"
    );

    let db = Database::new(config.db_config()).await?;
    let repo = db.denominations();

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(
            existing,
            "Database already has denominations, skipping seed. Delete the file to regenerate."
        );
        return Ok(());
    }

    let seeded = seed_denominations(&repo).await?;

    let total = repo.total_on_hand().await?;
    info!(seeded, total = %total, "Seed complete");

    db.close().await;
    Ok(())
}

/// Inserts every BRL denomination with ids 1..=12 in table order.
///
/// Stops at the first failure and returns it, so a partial seed never exits
/// cleanly.
async fn seed_denominations(repo: &DenominationRepository) -> DbResult<usize> {
    let mut seeded = 0;
    for (position, (cents, kind, quantity, label)) in BRL_DENOMINATIONS.iter().enumerate() {
        let mut denomination = Denomination::new(
            Money::from_cents(*cents),
            *quantity,
            *kind,
            image_url(*kind, *cents),
            *label,
        );
        denomination.assign_id(position as i64 + 1)?;

        if let Err(e) = repo.insert_with_id(&denomination).await {
            error!(label, error = %e, "Failed to insert denomination");
            return Err(e);
        }
        seeded += 1;
    }
    Ok(seeded)
}

/// `/img/brl/bill-200.png`, `/img/brl/coin-0.05.png`
fn image_url(kind: DenominationKind, cents: i64) -> String {
    let value = Money::from_cents(cents);
    let face = if value.minor() == 0 {
        value.major().to_string()
    } else {
        format!("{}.{:02}", value.major(), value.minor())
    };
    format!("/img/brl/{}-{}.png", kind, face)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cashbox=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
