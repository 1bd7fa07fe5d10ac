//! Billboard catalog and committed reservation lookups.
//!
//! Provides the resource lookup and committed-reservation lookup the booking engine
//! depends on, plus the catalog helpers used for display and seeding. Reservation reads
//! are generic over [`ConnectionTrait`] so checkout can run them inside its transaction.

use crate::{
    core::{interval::Interval, pricing},
    entities::{Billboard, OrderLine, billboard, order_line},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::{Expr, Order},
};
use serde::Deserialize;
use tracing::{debug, info};

/// Attributes for a billboard being added to the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBillboard {
    /// Street address
    pub address: String,
    /// Rental price per month
    pub monthly_rate: Decimal,
    /// Surface area in square meters
    pub size: f64,
    /// Quality grade
    pub quality: i32,
    /// Owner renting the billboard out
    pub owner_id: i64,
    /// Mount date, if known
    #[serde(default)]
    pub mount_date: Option<NaiveDate>,
}

/// Finds a billboard by ID, returning None if it does not exist.
pub async fn get_billboard<C>(db: &C, billboard_id: i64) -> Result<Option<billboard::Model>>
where
    C: ConnectionTrait,
{
    Billboard::find_by_id(billboard_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a billboard by ID, failing with [`Error::BillboardNotFound`] if it does not exist.
pub async fn require_billboard<C>(db: &C, billboard_id: i64) -> Result<billboard::Model>
where
    C: ConnectionTrait,
{
    get_billboard(db, billboard_id)
        .await?
        .ok_or(Error::BillboardNotFound { id: billboard_id })
}

/// Picks up to `count` billboards in random order for the landing page.
pub async fn get_random_billboards(
    db: &DatabaseConnection,
    count: u64,
) -> Result<Vec<billboard::Model>> {
    Billboard::find()
        .order_by(Expr::cust("RANDOM()"), Order::Asc)
        .limit(count)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a billboard to the catalog after validating its rate.
///
/// # Errors
/// Returns an error if:
/// - The address is empty or whitespace-only
/// - The monthly rate is not positive
/// - The database insert operation fails
pub async fn create_billboard<C>(db: &C, new: &NewBillboard) -> Result<billboard::Model>
where
    C: ConnectionTrait,
{
    if new.address.trim().is_empty() {
        return Err(Error::Config {
            message: "Billboard address cannot be empty".to_string(),
        });
    }

    if new.monthly_rate <= Decimal::ZERO {
        return Err(Error::InvalidRate {
            rate: new.monthly_rate,
        });
    }

    let billboard = billboard::ActiveModel {
        address: Set(new.address.trim().to_string()),
        monthly_rate_cents: Set(pricing::to_cents(new.monthly_rate)?),
        size: Set(new.size),
        quality: Set(new.quality),
        owner_id: Set(new.owner_id),
        mount_date: Set(new.mount_date),
        ..Default::default()
    };

    Ok(billboard.insert(db).await?)
}

/// Seeds the catalog from configuration. Only an empty catalog is seeded, so restarting
/// with the same config never duplicates billboards.
///
/// # Returns
/// The number of billboards inserted.
pub async fn seed_billboards(db: &DatabaseConnection, seeds: &[NewBillboard]) -> Result<usize> {
    let existing = Billboard::find().count(db).await?;
    if existing > 0 {
        info!(
            "Catalog already holds {} billboards, skipping seed of {}",
            existing,
            seeds.len()
        );
        return Ok(0);
    }

    for seed in seeds {
        debug!("Seeding billboard at '{}'", seed.address);
        create_billboard(db, seed).await?;
    }

    info!("Seeded {} billboards", seeds.len());
    Ok(seeds.len())
}

/// Committed reservation intervals for a billboard, in no particular order.
///
/// Each order line is one reservation.
pub async fn list_reservations<C>(db: &C, billboard_id: i64) -> Result<Vec<Interval>>
where
    C: ConnectionTrait,
{
    OrderLine::find()
        .filter(order_line::Column::BillboardId.eq(billboard_id))
        .all(db)
        .await?
        .iter()
        .map(order_line::Model::interval)
        .collect()
}

/// Committed intervals for a billboard sorted by start month, for the detail page.
pub async fn get_occupied_periods<C>(db: &C, billboard_id: i64) -> Result<Vec<Interval>>
where
    C: ConnectionTrait,
{
    let mut periods = list_reservations(db, billboard_id).await?;
    periods.sort_by_key(Interval::start);
    Ok(periods)
}
