//! Shared test utilities for the booking engine.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        billboard::{self, NewBillboard},
        cart::CartEntry,
        checkout::{DEFAULT_CHECKOUT_TIMEOUT, PlacedOrder, place_order},
        interval::Interval,
        renter::{self, NewRenter},
    },
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Billboard attributes with sensible defaults.
///
/// # Defaults
/// * `size`: 18.0
/// * `quality`: 3
/// * `owner_id`: 1
/// * `mount_date`: None
pub fn sample_billboard(address: &str, monthly_rate: Decimal) -> NewBillboard {
    NewBillboard {
        address: address.to_string(),
        monthly_rate,
        size: 18.0,
        quality: 3,
        owner_id: 1,
        mount_date: None,
    }
}

/// Creates a test billboard at the given monthly rate.
pub async fn create_test_billboard(
    db: &DatabaseConnection,
    monthly_rate: Decimal,
) -> Result<entities::billboard::Model> {
    billboard::create_billboard(db, &sample_billboard("Test Avenue 1", monthly_rate)).await
}

/// Creates a test renter for a login identity.
pub async fn create_test_renter(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entities::renter::Model> {
    renter::create_renter(
        db,
        user_id,
        NewRenter {
            first_name: "Test".to_string(),
            last_name: "Renter".to_string(),
            phone_number: "+10000000000".to_string(),
            address: "Test Street 1".to_string(),
            business_sphere: "retail".to_string(),
        },
    )
    .await
}

/// Commits a single-line order directly, as another renter's checkout would.
pub async fn commit_booking(
    db: &DatabaseConnection,
    renter: &entities::renter::Model,
    billboard_id: i64,
    start: &str,
    end: &str,
) -> Result<PlacedOrder> {
    let entry = CartEntry {
        billboard_id,
        interval: Interval::parse(start, end)?,
    };
    place_order(db, &renter.user_id, &[entry], DEFAULT_CHECKOUT_TIMEOUT).await
}
