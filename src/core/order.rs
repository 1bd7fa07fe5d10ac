//! Order history queries.
//!
//! Orders and their lines are only ever written by checkout; these are the read paths
//! used to show a renter what they have booked.

use crate::{
    entities::{Order, OrderLine, order, order_line},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// All orders placed by a renter, newest first.
pub async fn get_orders_for_renter<C>(db: &C, renter_id: i64) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::RenterId.eq(renter_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lines of one order in the order they were written.
pub async fn get_order_lines<C>(db: &C, order_id: i64) -> Result<Vec<order_line::Model>>
where
    C: ConnectionTrait,
{
    OrderLine::find()
        .filter(order_line::Column::OrderId.eq(order_id))
        .order_by_asc(order_line::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_orders_for_renter_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;
        let renter = create_test_renter(&db, "user-1").await?;
        let other = create_test_renter(&db, "user-2").await?;

        let first = commit_booking(&db, &renter, billboard.id, "01/2025", "01/2025").await?;
        let second = commit_booking(&db, &renter, billboard.id, "02/2025", "02/2025").await?;
        commit_booking(&db, &other, billboard.id, "03/2025", "03/2025").await?;

        let orders = get_orders_for_renter(&db, renter.id).await?;
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.order.id, first.order.id]);

        Ok(())
    }

    #[tokio::test]
    async fn test_order_lines_for_order() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;
        let renter = create_test_renter(&db, "user-1").await?;

        let placed = commit_booking(&db, &renter, billboard.id, "01/2025", "03/2025").await?;
        let lines = get_order_lines(&db, placed.order.id).await?;

        assert_eq!(lines, placed.lines);
        assert!(get_order_lines(&db, placed.order.id + 100).await?.is_empty());

        Ok(())
    }
}
