//! Renter entity - The durable identity behind a logged-in user who books billboards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Renter database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "renters")]
pub struct Model {
    /// Unique identifier for the renter
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login identity owned by the auth layer
    #[sea_orm(unique)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    /// Line of business, shown to billboard owners
    pub business_sphere: String,
}

/// Defines relationships between Renter and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One renter places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
