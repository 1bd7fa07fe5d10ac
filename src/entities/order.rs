//! Order entity - A committed checkout.
//!
//! An order is written in the same database transaction as all of its lines and is
//! never modified afterwards.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Renter who placed the order
    pub renter_id: i64,
    /// Sum of all line prices, in cents
    pub total_cost_cents: i64,
    /// When the checkout committed
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Order total as an exact decimal amount.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        crate::core::pricing::from_cents(self.total_cost_cents)
    }
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one renter
    #[sea_orm(
        belongs_to = "super::renter::Entity",
        from = "Column::RenterId",
        to = "super::renter::Column::Id"
    )]
    Renter,
    /// One order has many lines
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::renter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Renter.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
