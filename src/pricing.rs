//! Prices

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// A price was negative.
    #[error("price {0} is negative")]
    Negative(Decimal),

    /// The total does not fit in a decimal.
    #[error("total price overflowed")]
    Overflow,
}

/// Calculates the total of a list of prices. An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Negative`]: One of the prices was negative.
/// - [`TotalPriceError::Overflow`]: The total does not fit in a decimal.
pub fn total_price<I>(prices: I) -> Result<Decimal, TotalPriceError>
where
    I: IntoIterator<Item = Decimal>,
{
    prices.into_iter().try_fold(Decimal::ZERO, |total, price| {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(TotalPriceError::Negative(price));
        }

        total.checked_add(price).ok_or(TotalPriceError::Overflow)
    })
}
