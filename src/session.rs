//! Session-scoped cart storage.
//!
//! Pending cart entries live with the renter's session, not in the database. The engine
//! only needs an ordered container per session key; [`CartStorage`] is that seam and
//! [`InMemoryCartStorage`] is the implementation used by single-process deployments
//! and tests. A cookie- or cache-backed store implements the same trait.

use crate::{core::cart::CartEntry, errors::Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Ordered, per-session container of pending cart entries.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Entries for `session` in insertion order. Unknown sessions have an empty cart.
    async fn entries(&self, session: &str) -> Result<Vec<CartEntry>>;

    /// Appends an entry to the end of the session's cart.
    async fn append(&self, session: &str, entry: CartEntry) -> Result<()>;

    /// Appends `entry` only if `accept` approves the session's current entries.
    ///
    /// The check and the append are one step: two calls for the same session never both
    /// see the cart as it was before either of them.
    async fn append_if(
        &self,
        session: &str,
        entry: CartEntry,
        accept: &(dyn for<'a> Fn(&'a [CartEntry]) -> Result<()> + Send + Sync),
    ) -> Result<()>;

    /// Removes and returns the entry at `index`, or None if out of range.
    async fn remove_at(&self, session: &str, index: usize) -> Result<Option<CartEntry>>;

    /// Removes the first occurrence of each of `entries`. Anything else stays, in order.
    async fn remove_entries(&self, session: &str, entries: &[CartEntry]) -> Result<()>;

    /// Empties the session's cart.
    async fn clear(&self, session: &str) -> Result<()>;
}

/// Process-local cart storage keyed by session.
#[derive(Debug, Default)]
pub struct InMemoryCartStorage {
    carts: RwLock<HashMap<String, Vec<CartEntry>>>,
}

impl InMemoryCartStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStorage for InMemoryCartStorage {
    async fn entries(&self, session: &str) -> Result<Vec<CartEntry>> {
        let carts = self.carts.read().await;
        Ok(carts.get(session).cloned().unwrap_or_default())
    }

    async fn append(&self, session: &str, entry: CartEntry) -> Result<()> {
        let mut carts = self.carts.write().await;
        carts.entry(session.to_string()).or_default().push(entry);
        Ok(())
    }

    async fn append_if(
        &self,
        session: &str,
        entry: CartEntry,
        accept: &(dyn for<'a> Fn(&'a [CartEntry]) -> Result<()> + Send + Sync),
    ) -> Result<()> {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(session.to_string()).or_default();
        accept(cart.as_slice())?;
        cart.push(entry);
        Ok(())
    }

    async fn remove_at(&self, session: &str, index: usize) -> Result<Option<CartEntry>> {
        let mut carts = self.carts.write().await;
        let Some(cart) = carts.get_mut(session) else {
            return Ok(None);
        };
        if index >= cart.len() {
            return Ok(None);
        }
        Ok(Some(cart.remove(index)))
    }

    async fn remove_entries(&self, session: &str, entries: &[CartEntry]) -> Result<()> {
        let mut carts = self.carts.write().await;
        let Some(cart) = carts.get_mut(session) else {
            return Ok(());
        };
        for entry in entries {
            if let Some(position) = cart.iter().position(|e| e == entry) {
                cart.remove(position);
            }
        }
        if cart.is_empty() {
            carts.remove(session);
        }
        Ok(())
    }

    async fn clear(&self, session: &str) -> Result<()> {
        let mut carts = self.carts.write().await;
        carts.remove(session);
        Ok(())
    }
}
