//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The one piece an entity cannot express,
//! the composite unique index that stops two orders claiming the same billboard-month,
//! is created here explicitly.

use crate::entities::{Billboard, OccupiedMonth, Order, OrderLine, Renter, occupied_month};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, sea_query::Index};

const DEFAULT_DATABASE_URL: &str = "sqlite://billboards.sqlite?mode=rwc";

/// Name of the unique index over `(billboard_id, month_index)`.
pub const OCCUPIED_MONTH_INDEX: &str = "idx_occupied_months_billboard_month";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables and indexes if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut tables = [
        schema.create_table_from_entity(Billboard),
        schema.create_table_from_entity(Renter),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderLine),
        schema.create_table_from_entity(OccupiedMonth),
    ];
    for table in &mut tables {
        table.if_not_exists();
        db.execute(builder.build(&*table)).await?;
    }

    let month_claims = Index::create()
        .if_not_exists()
        .name(OCCUPIED_MONTH_INDEX)
        .table(OccupiedMonth)
        .col(occupied_month::Column::BillboardId)
        .col(occupied_month::Column::MonthIndex)
        .unique()
        .to_owned();
    db.execute(builder.build(&month_claims)).await?;

    Ok(())
}
