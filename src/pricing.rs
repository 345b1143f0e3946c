//! Prices

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating a total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total does not fit in minor units.
    #[error("{count} packs at {unit_minor} minor units overflows the price range")]
    Overflow {
        /// Number of packs on the line
        count: usize,

        /// Unit price in minor units
        unit_minor: i64,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `count` packs at `unit_price` each.
///
/// Works in minor units, so the result is exact to the currency's precision.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the product does not fit in minor units.
pub fn line_price<'a>(
    unit_price: Money<'a, Currency>,
    count: usize,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let unit_minor = unit_price.to_minor_units();

    let minor = i64::try_from(count)
        .ok()
        .and_then(|count| unit_minor.checked_mul(count))
        .ok_or(TotalPriceError::Overflow { count, unit_minor })?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sums a list of amounts, starting from zero in `currency`.
///
/// # Errors
///
/// - [`TotalPriceError::Money`]: an amount is in a different currency.
pub fn total_price<'a>(
    amounts: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let total = amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| acc.add(amount))?;

    Ok(total)
}
