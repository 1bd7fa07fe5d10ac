//! Overlap detection against committed reservations and pending cart entries.
//!
//! Conflict checks hold no state of their own: each call reads the billboard's committed
//! reservations through the supplied connection and applies the closed-interval overlap
//! test. Passing a transaction handle makes the read see that transaction's snapshot.

use crate::{
    core::{
        billboard::list_reservations,
        interval::{Interval, overlaps_any},
    },
    errors::{ConflictKind, Error, Result},
};
use sea_orm::ConnectionTrait;

/// Reports what `candidate` collides with, if anything.
///
/// Committed reservations are checked first; `pending` intervals (other cart entries
/// for the same billboard) are only consulted when no committed booking overlaps.
pub async fn find_conflict<C>(
    db: &C,
    billboard_id: i64,
    candidate: &Interval,
    pending: &[Interval],
) -> Result<Option<ConflictKind>>
where
    C: ConnectionTrait,
{
    let committed = list_reservations(db, billboard_id).await?;
    if overlaps_any(candidate, &committed) {
        return Ok(Some(ConflictKind::ExistingBooking));
    }

    if overlaps_any(candidate, pending) {
        return Ok(Some(ConflictKind::PendingCartEntry));
    }

    Ok(None)
}

/// True if `candidate` overlaps a committed reservation or any of `pending`.
pub async fn has_conflict<C>(
    db: &C,
    billboard_id: i64,
    candidate: &Interval,
    pending: &[Interval],
) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(find_conflict(db, billboard_id, candidate, pending)
        .await?
        .is_some())
}

/// Fails with [`Error::Conflict`] naming the kind of overlap found.
pub async fn ensure_available<C>(
    db: &C,
    billboard_id: i64,
    candidate: &Interval,
    pending: &[Interval],
) -> Result<()>
where
    C: ConnectionTrait,
{
    match find_conflict(db, billboard_id, candidate, pending).await? {
        Some(kind) => Err(Error::Conflict { billboard_id, kind }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    fn interval(start: &str, end: &str) -> Interval {
        Interval::parse(start, end).unwrap()
    }

    #[tokio::test]
    async fn test_no_conflict_on_free_billboard() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;

        let candidate = interval("01/2025", "03/2025");
        assert!(!has_conflict(&db, billboard.id, &candidate, &[]).await?);
        assert_eq!(find_conflict(&db, billboard.id, &candidate, &[]).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_conflict_with_committed_reservation() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;
        let renter = create_test_renter(&db, "owner-of-feb").await?;
        commit_booking(&db, &renter, billboard.id, "02/2025", "02/2025").await?;

        let candidate = interval("01/2025", "03/2025");
        assert!(has_conflict(&db, billboard.id, &candidate, &[]).await?);
        assert_eq!(
            find_conflict(&db, billboard.id, &candidate, &[]).await?,
            Some(ConflictKind::ExistingBooking)
        );

        let after = interval("03/2025", "04/2025");
        assert!(!has_conflict(&db, billboard.id, &after, &[]).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_conflict_is_scoped_to_billboard() -> Result<()> {
        let db = setup_test_db().await?;
        let booked = create_test_billboard(&db, dec!(100)).await?;
        let free = create_test_billboard(&db, dec!(100)).await?;
        let renter = create_test_renter(&db, "user-1").await?;
        commit_booking(&db, &renter, booked.id, "01/2025", "12/2025").await?;

        let candidate = interval("06/2025", "06/2025");
        assert!(has_conflict(&db, booked.id, &candidate, &[]).await?);
        assert!(!has_conflict(&db, free.id, &candidate, &[]).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_conflict_with_pending_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;
        let pending = [interval("05/2025", "06/2025")];

        assert_eq!(
            find_conflict(&db, billboard.id, &interval("06/2025", "07/2025"), &pending).await?,
            Some(ConflictKind::PendingCartEntry)
        );
        assert_eq!(
            find_conflict(&db, billboard.id, &interval("07/2025", "08/2025"), &pending).await?,
            None
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_committed_conflict_reported_before_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;
        let renter = create_test_renter(&db, "user-1").await?;
        commit_booking(&db, &renter, billboard.id, "03/2025", "03/2025").await?;

        let candidate = interval("03/2025", "04/2025");
        let pending = [interval("04/2025", "04/2025")];
        let result = ensure_available(&db, billboard.id, &candidate, &pending).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::Conflict {
                kind: ConflictKind::ExistingBooking,
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejection_is_stable_across_retries() -> Result<()> {
        let db = setup_test_db().await?;
        let billboard = create_test_billboard(&db, dec!(100)).await?;
        let renter = create_test_renter(&db, "user-1").await?;
        commit_booking(&db, &renter, billboard.id, "02/2025", "02/2025").await?;

        let candidate = interval("01/2025", "03/2025");
        for _ in 0..5 {
            let result = ensure_available(&db, billboard.id, &candidate, &[]).await;
            assert!(matches!(result, Err(Error::Conflict { .. })));
        }

        Ok(())
    }
}
