//! Billboard entity - A bookable advertising resource.
//!
//! Billboards are read-only to the booking engine apart from seeding. The monthly rate
//! is stored in minor currency units so that pricing stays exact.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billboard database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "billboards")]
pub struct Model {
    /// Unique identifier for the billboard
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Street address where the billboard is mounted
    pub address: String,
    /// Rental price per month, in cents
    pub monthly_rate_cents: i64,
    /// Surface area in square meters
    pub size: f64,
    /// Quality grade, higher is better
    pub quality: i32,
    /// ID of the owner who rents the billboard out
    pub owner_id: i64,
    /// When the billboard was mounted, if known
    pub mount_date: Option<Date>,
}

impl Model {
    /// Monthly rate as an exact decimal amount.
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        crate::core::pricing::from_cents(self.monthly_rate_cents)
    }
}

/// Defines relationships between Billboard and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One billboard appears on many order lines
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
