//! Renter identity resolution.
//!
//! Logins are owned by the auth layer; the booking engine only needs to map a caller's
//! login identity to the durable renter ID that orders are recorded against.

use crate::{
    entities::{Renter, renter},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Profile details for registering a renter.
#[derive(Debug, Clone, Default)]
pub struct NewRenter {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub business_sphere: String,
}

/// Resolves a login identity to its renter ID.
///
/// # Errors
/// Returns [`Error::RenterNotFound`] if no renter is registered for `user_id`.
pub async fn get_renter_id<C>(db: &C, user_id: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    Renter::find()
        .filter(renter::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .map(|found| found.id)
        .ok_or_else(|| Error::RenterNotFound {
            identity: user_id.to_string(),
        })
}

/// Registers a renter profile for a login identity.
pub async fn create_renter<C>(db: &C, user_id: &str, profile: NewRenter) -> Result<renter::Model>
where
    C: ConnectionTrait,
{
    if user_id.trim().is_empty() {
        return Err(Error::Config {
            message: "Renter user ID cannot be empty".to_string(),
        });
    }

    let renter = renter::ActiveModel {
        user_id: Set(user_id.trim().to_string()),
        first_name: Set(profile.first_name),
        last_name: Set(profile.last_name),
        phone_number: Set(profile.phone_number),
        address: Set(profile.address),
        business_sphere: Set(profile.business_sphere),
        ..Default::default()
    };

    Ok(renter.insert(db).await?)
}
