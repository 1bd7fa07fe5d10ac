//! Cart business logic - Pending reservations held in the renter's session.
//!
//! A [`CartStore`] binds one session's cart storage to the database. Every entry is
//! validated when it is added: the billboard must exist, the interval must not start in
//! the past (when that policy is on), and it must not overlap a committed reservation or
//! another entry for the same billboard in this cart. Entries are addressed by their
//! position, which is insertion order.

use crate::{
    config::BookingConfig,
    core::{
        billboard::require_billboard,
        conflict::ensure_available,
        interval::{Interval, YearMonth, overlaps_any},
        pricing,
    },
    entities::billboard,
    errors::{ConflictKind, Error, Result},
    session::CartStorage,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A pending reservation of one billboard for one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Billboard to reserve
    pub billboard_id: i64,
    /// Months to reserve it for
    pub interval: Interval,
}

impl CartEntry {
    /// The same entry with its interval re-checked.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInterval`] if the interval is malformed.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            interval: self.interval.validated()?,
            ..self
        })
    }
}

/// A cart entry joined with its billboard and current price, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Position in the cart, usable with [`CartStore::remove`]
    pub index: usize,
    /// The stored entry
    pub entry: CartEntry,
    /// The billboard as currently in the catalog
    pub billboard: billboard::Model,
    /// Price at the billboard's current monthly rate
    pub price: Decimal,
}

/// One session's cart, validated against the database.
pub struct CartStore<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn CartStorage,
    session: String,
    earliest_start: Option<YearMonth>,
}

impl<'a> CartStore<'a> {
    /// Creates a cart view for `session` without a past-start restriction.
    pub fn new(
        db: &'a DatabaseConnection,
        storage: &'a dyn CartStorage,
        session: impl Into<String>,
    ) -> Self {
        Self {
            db,
            storage,
            session: session.into(),
            earliest_start: None,
        }
    }

    /// Creates a cart view that applies the configured booking policy.
    pub fn from_config(
        db: &'a DatabaseConnection,
        storage: &'a dyn CartStorage,
        session: impl Into<String>,
        booking: &BookingConfig,
    ) -> Self {
        let cart = Self::new(db, storage, session);
        if booking.reject_past_starts {
            cart.with_earliest_start(YearMonth::current())
        } else {
            cart
        }
    }

    /// Rejects entries starting before `month`.
    #[must_use]
    pub fn with_earliest_start(mut self, month: YearMonth) -> Self {
        self.earliest_start = Some(month);
        self
    }

    /// Session key this cart belongs to.
    #[must_use]
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Database the cart validates against.
    #[must_use]
    pub const fn database(&self) -> &'a DatabaseConnection {
        self.db
    }

    /// Raw entries in insertion order.
    pub async fn entries(&self) -> Result<Vec<CartEntry>> {
        self.storage.entries(&self.session).await
    }

    /// Validates and appends a reservation to the cart.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The interval is malformed
    /// - The billboard does not exist
    /// - The interval starts before the earliest allowed month
    /// - The interval overlaps a committed reservation or another cart entry for the
    ///   same billboard ([`Error::Conflict`] carries which)
    #[instrument(skip(self), fields(session = %self.session))]
    pub async fn add(&self, billboard_id: i64, interval: Interval) -> Result<CartEntry> {
        let interval = interval.validated()?;
        require_billboard(self.db, billboard_id).await?;

        if let Some(earliest) = self
            .earliest_start
            .filter(|earliest| interval.start() < *earliest)
        {
            return Err(Error::invalid_interval(format!(
                "start {} must not be in the past (earliest {earliest})",
                interval.start()
            )));
        }

        ensure_available(self.db, billboard_id, &interval, &[]).await?;

        // Pending entries are checked under the storage lock so two adds on one
        // session cannot both pass.
        let entry = CartEntry {
            billboard_id,
            interval,
        };
        self.storage
            .append_if(&self.session, entry, &|current| {
                let pending = current
                    .iter()
                    .filter(|other| other.billboard_id == billboard_id)
                    .map(|other| &other.interval);
                if overlaps_any(&interval, pending) {
                    Err(Error::Conflict {
                        billboard_id,
                        kind: ConflictKind::PendingCartEntry,
                    })
                } else {
                    Ok(())
                }
            })
            .await?;
        debug!("Added billboard {} for {} to cart", billboard_id, interval);

        Ok(entry)
    }

    /// Parses `MM/YYYY` form input and adds the resulting interval.
    pub async fn add_from_input(
        &self,
        billboard_id: i64,
        start: &str,
        end: &str,
    ) -> Result<CartEntry> {
        let interval = Interval::parse(start, end)?;
        self.add(billboard_id, interval).await
    }

    /// Removes the entry at `index`; later entries shift down by one.
    ///
    /// # Errors
    /// Returns [`Error::CartEntryNotFound`] if `index` is out of range.
    #[instrument(skip(self), fields(session = %self.session))]
    pub async fn remove(&self, index: usize) -> Result<CartEntry> {
        let removed = self
            .storage
            .remove_at(&self.session, index)
            .await?
            .ok_or(Error::CartEntryNotFound { index })?;
        debug!(
            "Removed billboard {} for {} from cart",
            removed.billboard_id, removed.interval
        );
        Ok(removed)
    }

    /// Entries joined with their billboard and priced at its current rate.
    ///
    /// # Errors
    /// Returns [`Error::BillboardNotFound`] if a billboard has left the catalog.
    pub async fn list(&self) -> Result<Vec<CartLine>> {
        let entries = self.entries().await?;
        let mut lines = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let billboard = require_billboard(self.db, entry.billboard_id).await?;
            let price = pricing::price(billboard.monthly_rate(), &entry.interval)?;
            lines.push(CartLine {
                index,
                entry,
                billboard,
                price,
            });
        }

        Ok(lines)
    }

    /// Sum of all line prices; zero for an empty cart.
    pub async fn total(&self) -> Result<Decimal> {
        Ok(self.list().await?.iter().map(|line| line.price).sum())
    }

    /// Empties the cart.
    pub async fn clear(&self) -> Result<()> {
        self.storage.clear(&self.session).await
    }

    /// Drops exactly `entries`, leaving anything added since they were read.
    /// Checkout calls this once its order has committed.
    pub async fn remove_entries(&self, entries: &[CartEntry]) -> Result<()> {
        self.storage.remove_entries(&self.session, entries).await
    }
}
