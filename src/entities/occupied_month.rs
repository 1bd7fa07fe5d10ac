//! Occupied month entity - One row per month a billboard is committed for.
//!
//! The table carries a unique index on `(billboard_id, month_index)`, so the database
//! itself refuses a second booking of the same billboard in the same month even when
//! two checkouts race past the application-level overlap check.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Occupied month database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "occupied_months")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub billboard_id: i64,
    /// Months since year zero, see `YearMonth::index`
    pub month_index: i64,
    /// Order line that claimed this month
    pub order_line_id: i64,
}

/// Defines relationships between OccupiedMonth and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each claimed month belongs to one order line
    #[sea_orm(
        belongs_to = "super::order_line::Entity",
        from = "Column::OrderLineId",
        to = "super::order_line::Column::Id"
    )]
    OrderLine,
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
