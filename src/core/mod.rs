//! Core booking logic - framework-agnostic intervals, conflict checks, pricing,
//! cart handling and checkout.

/// Billboard catalog and committed reservation lookups
pub mod billboard;
/// Session cart validated against committed state
pub mod cart;
/// All-or-nothing conversion of a cart into an order
pub mod checkout;
/// Overlap detection
pub mod conflict;
/// Whole-month intervals
pub mod interval;
/// Order history queries
pub mod order;
/// Interval pricing and money conversion
pub mod pricing;
/// Renter identity resolution
pub mod renter;
