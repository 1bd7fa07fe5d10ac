//! Interval pricing.
//!
//! A booking costs the billboard's monthly rate times the number of whole months it
//! covers. Amounts are exact decimals and are kept to the currency's minor unit
//! (two decimal places); the database stores them as integer cents.

use crate::{
    core::interval::Interval,
    errors::{Error, Result},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Decimal places of the currency's minor unit.
pub const MINOR_UNIT_DP: u32 = 2;

/// Prices `interval` at `monthly_rate`.
///
/// # Errors
/// Returns [`Error::InvalidRate`] if the rate is not positive and
/// [`Error::InvalidInterval`] if the interval covers no months.
pub fn price(monthly_rate: Decimal, interval: &Interval) -> Result<Decimal> {
    if monthly_rate <= Decimal::ZERO {
        return Err(Error::InvalidRate { rate: monthly_rate });
    }

    let months = interval.month_count();
    if months <= 0 {
        return Err(Error::invalid_interval(format!(
            "{interval} spans {months} months"
        )));
    }

    monthly_rate
        .checked_mul(Decimal::from(months))
        .map(|amount| amount.round_dp(MINOR_UNIT_DP))
        .ok_or(Error::InvalidRate { rate: monthly_rate })
}

/// Converts an amount to integer minor units, rounding to the nearest cent.
///
/// # Errors
/// Returns [`Error::InvalidRate`] if the amount does not fit in an `i64` of cents.
pub fn to_cents(amount: Decimal) -> Result<i64> {
    amount
        .round_dp(MINOR_UNIT_DP)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(Error::InvalidRate { rate: amount })
}

/// Converts integer minor units back to an exact amount.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MINOR_UNIT_DP)
}
