//! Checkout business logic - Turns a cart into a committed order.
//!
//! Checkout is all-or-nothing. Inside one database transaction every cart entry is
//! re-checked against the committed reservations visible to that transaction, the
//! renter is resolved, each line is priced, and the order with all its lines is written.
//! Each line also claims its months in `occupied_months`, whose unique index makes the
//! database reject a second booking of the same billboard-month even when two checkouts
//! pass the overlap check at the same time. Any failure rolls the transaction back and
//! leaves the cart untouched; the checked-out entries leave the cart only after the
//! commit.

use crate::{
    config::BookingConfig,
    core::{
        billboard::require_billboard,
        cart::{CartEntry, CartStore},
        conflict::ensure_available,
        pricing,
        renter::get_renter_id,
    },
    entities::{OccupiedMonth, occupied_month, order, order_line},
    errors::{ConflictKind, Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    Set, SqlErr, TransactionTrait,
};
use std::time::Duration;
use tokio::time::error::Elapsed;
use tracing::{info, instrument, warn};

/// How long a checkout transaction may run before it is abandoned and rolled back.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// A committed order together with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The order row
    pub order: order::Model,
    /// One line per cart entry, in cart order
    pub lines: Vec<order_line::Model>,
}

/// Orchestrates checkout of a session cart.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutCoordinator {
    timeout: Duration,
}

impl Default for CheckoutCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKOUT_TIMEOUT)
    }
}

impl CheckoutCoordinator {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[must_use]
    pub const fn from_config(booking: &BookingConfig) -> Self {
        Self::new(Duration::from_secs(booking.checkout_timeout_secs))
    }

    /// Commits everything in `cart` as one order for the renter behind `user_id`.
    ///
    /// On success the checked-out entries leave the cart; anything added while the
    /// checkout ran stays. On any failure before the commit nothing is written and the
    /// cart keeps all its entries so the renter can adjust and retry.
    ///
    /// # Errors
    /// See [`place_order`]. If the order commits but the cart cannot be updated,
    /// returns [`Error::CartNotCleared`] carrying the committed order.
    #[instrument(skip(self, cart), fields(session = %cart.session()))]
    pub async fn checkout(&self, cart: &CartStore<'_>, user_id: &str) -> Result<PlacedOrder> {
        let entries = cart.entries().await?;
        let placed = place_order(cart.database(), user_id, &entries, self.timeout).await?;

        match cart.remove_entries(&entries).await {
            Ok(()) => Ok(placed),
            Err(e) => Err(Error::CartNotCleared {
                order: Box::new(placed),
                source: Box::new(e),
            }),
        }
    }
}

/// Writes `entries` as one order for the renter behind `user_id`, atomically.
///
/// # Errors
/// Returns an error if:
/// - `entries` is empty ([`Error::EmptyCart`])
/// - An entry's interval is malformed ([`Error::InvalidInterval`])
/// - Any entry overlaps a committed reservation ([`Error::Conflict`] naming the billboard)
/// - A billboard or the renter does not exist
/// - The transaction does not finish within `timeout` ([`Error::CheckoutTimeout`])
/// - The database fails ([`Error::Database`])
///
/// In every error case the transaction has been rolled back.
#[instrument(skip(db, entries), fields(lines = entries.len()))]
pub async fn place_order(
    db: &DatabaseConnection,
    user_id: &str,
    entries: &[CartEntry],
    timeout: Duration,
) -> Result<PlacedOrder> {
    if entries.is_empty() {
        return Err(Error::EmptyCart);
    }
    let entries = entries
        .iter()
        .copied()
        .map(CartEntry::validated)
        .collect::<Result<Vec<_>>>()?;

    let txn = db.begin().await?;
    let outcome = tokio::time::timeout(timeout, write_order(&txn, user_id, &entries)).await;
    let placed = settle(txn, outcome).await?;

    info!(
        "Order {} committed with {} lines, total {}",
        placed.order.id,
        placed.lines.len(),
        placed.order.total_cost()
    );
    Ok(placed)
}

/// Commits the transaction if the work succeeded in time, otherwise rolls it back.
async fn settle<T>(
    txn: DatabaseTransaction,
    outcome: std::result::Result<Result<T>, Elapsed>,
) -> Result<T> {
    match outcome {
        Ok(Ok(value)) => {
            txn.commit().await?;
            Ok(value)
        }
        Ok(Err(e)) => {
            roll_back(txn).await;
            Err(e)
        }
        Err(_) => {
            roll_back(txn).await;
            Err(Error::CheckoutTimeout)
        }
    }
}

async fn roll_back(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        // Dropping an unfinished transaction also rolls it back.
        warn!("Explicit checkout rollback failed: {}", e);
    }
}

async fn write_order<C>(txn: &C, user_id: &str, entries: &[CartEntry]) -> Result<PlacedOrder>
where
    C: ConnectionTrait,
{
    for entry in entries {
        ensure_available(txn, entry.billboard_id, &entry.interval, &[]).await?;
    }

    let renter_id = get_renter_id(txn, user_id).await?;

    let mut prices = Vec::with_capacity(entries.len());
    for entry in entries {
        let billboard = require_billboard(txn, entry.billboard_id).await?;
        prices.push(pricing::price(billboard.monthly_rate(), &entry.interval)?);
    }
    let total: Decimal = prices.iter().copied().sum();

    let order = order::ActiveModel {
        renter_id: Set(renter_id),
        total_cost_cents: Set(pricing::to_cents(total)?),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let mut lines = Vec::with_capacity(entries.len());
    for (entry, price) in entries.iter().zip(prices) {
        let line = order_line::ActiveModel {
            order_id: Set(order.id),
            billboard_id: Set(entry.billboard_id),
            start_month: Set(entry.interval.start().month()),
            start_year: Set(entry.interval.start().year()),
            end_month: Set(entry.interval.end().month()),
            end_year: Set(entry.interval.end().year()),
            price_cents: Set(pricing::to_cents(price)?),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        claim_months(txn, &line, entry).await?;
        lines.push(line);
    }

    Ok(PlacedOrder { order, lines })
}

async fn claim_months<C>(txn: &C, line: &order_line::Model, entry: &CartEntry) -> Result<()>
where
    C: ConnectionTrait,
{
    let months = entry
        .interval
        .month_indices()
        .map(|month_index| occupied_month::ActiveModel {
            billboard_id: Set(entry.billboard_id),
            month_index: Set(month_index),
            order_line_id: Set(line.id),
            ..Default::default()
        });

    OccupiedMonth::insert_many(months)
        .exec(txn)
        .await
        .map_err(|e| claim_error(e, entry.billboard_id))?;

    Ok(())
}

fn claim_error(err: DbErr, billboard_id: i64) -> Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        Error::Conflict {
            billboard_id,
            kind: ConflictKind::ExistingBooking,
        }
    } else {
        err.into()
    }
}
