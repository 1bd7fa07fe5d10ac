//! Order line entity - One booked billboard interval inside an order.
//!
//! Each row is also the committed reservation for its billboard. The price is fixed at
//! checkout time and never recomputed.

use crate::core::interval::{Interval, YearMonth};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this line belongs to
    pub order_id: i64,
    /// Billboard being reserved
    pub billboard_id: i64,
    pub start_month: i32,
    pub start_year: i32,
    pub end_month: i32,
    pub end_year: i32,
    /// Price of the whole interval, in cents
    pub price_cents: i64,
}

impl Model {
    /// Rebuilds the reserved interval from the stored columns.
    ///
    /// # Errors
    /// Returns an error if the stored months do not form a valid interval.
    pub fn interval(&self) -> crate::errors::Result<Interval> {
        Interval::new(
            YearMonth::new(self.start_month, self.start_year)?,
            YearMonth::new(self.end_month, self.end_year)?,
        )
    }

    /// Line price as an exact decimal amount.
    #[must_use]
    pub fn price(&self) -> Decimal {
        crate::core::pricing::from_cents(self.price_cents)
    }
}

/// Defines relationships between OrderLine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line reserves one billboard
    #[sea_orm(
        belongs_to = "super::billboard::Entity",
        from = "Column::BillboardId",
        to = "super::billboard::Column::Id"
    )]
    Billboard,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::billboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Billboard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
