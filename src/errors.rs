//! Unified error type for the booking engine.
//!
//! Every operation reports failures as a typed [`Error`]. The request layer decides
//! how to render each kind; nothing here is swallowed or retried internally.

use crate::core::checkout::PlacedOrder;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// What a rejected interval collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// A committed reservation already covers one of the months
    ExistingBooking,
    /// Another entry in the same cart already covers one of the months
    PendingCartEntry,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExistingBooking => f.write_str("overlaps existing booking"),
            Self::PendingCartEntry => f.write_str("overlaps item already in cart"),
        }
    }
}

/// Every failure the booking engine reports.
#[derive(Debug, Error)]
pub enum Error {
    /// A month range that is inverted or names a month outside 1..=12
    #[error("Invalid interval: {reason}")]
    InvalidInterval {
        /// What was wrong with it
        reason: String,
    },

    /// User input that is not a `MM/YYYY` month
    #[error("Invalid date '{input}', expected MM/YYYY")]
    InvalidDate {
        /// The text as submitted
        input: String,
    },

    /// A monthly rate that is not positive, or an amount too large to store
    #[error("Invalid monthly rate: {rate}")]
    InvalidRate {
        /// The offending amount
        rate: Decimal,
    },

    /// The requested months are already taken
    #[error("Billboard {billboard_id}: selected period {kind}")]
    Conflict {
        /// Billboard whose months collide
        billboard_id: i64,
        /// Whether a committed booking or another cart entry holds them
        kind: ConflictKind,
    },

    /// Checkout was asked to commit a cart with no entries
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// No billboard with this id in the catalog
    #[error("Billboard not found: {id}")]
    BillboardNotFound {
        /// Requested billboard id
        id: i64,
    },

    /// The login identity has no renter profile
    #[error("Renter not found for user: {identity}")]
    RenterNotFound {
        /// Login identity with no renter profile
        identity: String,
    },

    /// Cart position out of range
    #[error("Cart entry not found at index {index}")]
    CartEntryNotFound {
        /// Position that was out of range
        index: usize,
    },

    /// Checkout ran past its deadline; nothing was written
    #[error("Checkout did not finish in time and was rolled back")]
    CheckoutTimeout,

    /// The order committed but its entries could not be removed from the cart
    #[error("Order {} committed but the cart was not updated: {source}", .order.order.id)]
    CartNotCleared {
        /// The committed order
        order: Box<PlacedOrder>,
        /// Why the cart storage failed
        source: Box<Error>,
    },

    /// Storage failure, including cart storage backed by a database
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// `config.toml` could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What could not be read or parsed
        message: String,
    },
}

impl Error {
    /// True for failures where repeating the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::CheckoutTimeout)
    }

    /// True for unknown billboards, renters and cart positions.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BillboardNotFound { .. }
                | Self::RenterNotFound { .. }
                | Self::CartEntryNotFound { .. }
        )
    }

    pub(crate) fn invalid_interval(reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            reason: reason.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
