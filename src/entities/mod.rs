//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod billboard;
pub mod occupied_month;
pub mod order;
pub mod order_line;
pub mod renter;

// Re-export specific types to avoid conflicts
pub use billboard::{Column as BillboardColumn, Entity as Billboard, Model as BillboardModel};
pub use occupied_month::{
    Column as OccupiedMonthColumn, Entity as OccupiedMonth, Model as OccupiedMonthModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_line::{Column as OrderLineColumn, Entity as OrderLine, Model as OrderLineModel};
pub use renter::{Column as RenterColumn, Entity as Renter, Model as RenterModel};
