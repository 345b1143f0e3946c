//! Orders
//!
//! An order is built by solving every demanded product on its own. A product that
//! cannot be supplied records its error and the rest of the order carries on.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info_span, warn};

use crate::{
    pricing::{TotalPriceError, total_price},
    products::ProductCatalog,
    solvers::{ShortfallPolicy, SolverError},
};

pub mod demand;
pub mod line;

pub use demand::{Demand, DemandEntry};
pub use line::{OrderLine, PackCount};

/// Default upper bound on a single product's requested quantity.
pub const DEFAULT_MAX_QUANTITY: usize = 100_000;

/// Reasons a single product could not be ordered.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The product is not in the catalog.
    #[error("unknown product {0}")]
    UnknownProduct(String),

    /// The requested quantity exceeds the configured limit.
    #[error("quantity {quantity} exceeds the limit of {limit}")]
    QuantityTooLarge {
        /// Requested quantity
        quantity: usize,

        /// Configured limit
        limit: usize,
    },

    /// Wrapped solver error
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Settings applied to every line of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderSettings {
    /// What to do with quantities no combination matches exactly
    pub policy: ShortfallPolicy,

    /// Largest quantity accepted for a single product
    pub max_quantity: usize,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            policy: ShortfallPolicy::default(),
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

/// The outcome for one demanded product.
#[derive(Debug)]
pub struct OrderEntry<'a> {
    code: String,
    requested: usize,
    result: Result<OrderLine<'a>, OrderError>,
}

impl<'a> OrderEntry<'a> {
    /// Product code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Requested quantity
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// The solved line, or why it could not be solved
    pub fn result(&self) -> Result<&OrderLine<'a>, &OrderError> {
        self.result.as_ref()
    }
}

/// Solved lines for every demanded product, in demand order.
#[derive(Debug)]
pub struct Order<'a> {
    entries: Vec<OrderEntry<'a>>,
    currency: &'static Currency,
}

impl<'a> Order<'a> {
    /// All entries, successful or not
    pub fn entries(&self) -> &[OrderEntry<'a>] {
        &self.entries
    }

    /// The entry for a product code.
    pub fn entry(&self, code: &str) -> Option<&OrderEntry<'a>> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// The solved line for a product code, if it was solved.
    pub fn line(&self, code: &str) -> Option<&OrderLine<'a>> {
        self.entry(code).and_then(|entry| entry.result.as_ref().ok())
    }

    /// Successfully solved lines with their product codes.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &OrderLine<'a>)> {
        self.entries
            .iter()
            .filter_map(|entry| Some((entry.code.as_str(), entry.result.as_ref().ok()?)))
    }

    /// Products that could not be ordered, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &OrderError)> {
        self.entries
            .iter()
            .filter_map(|entry| Some((entry.code.as_str(), entry.result.as_ref().err()?)))
    }

    /// Sum of every solved line.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the lines cannot be added up.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(self.lines().map(|(_, line)| line.total()), self.currency)
    }

    /// Currency the order is priced in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Solves every product in `demand` against `catalog`.
pub fn build_order<'a>(
    catalog: &ProductCatalog<'a>,
    demand: &Demand,
    settings: &OrderSettings,
) -> Order<'a> {
    let span = info_span!("build_order", products = demand.len(), policy = ?settings.policy);
    let _enter = span.enter();

    let entries = demand
        .iter()
        .map(|entry| {
            let result = solve_entry(catalog, entry, settings);

            match &result {
                Ok(line) => debug!(
                    product = %entry.code,
                    requested = entry.quantity,
                    packs = line.package_count(),
                    total = %line.total(),
                    "solved order line"
                ),
                Err(error) => warn!(
                    product = %entry.code,
                    requested = entry.quantity,
                    %error,
                    "could not solve order line"
                ),
            }

            OrderEntry {
                code: entry.code.clone(),
                requested: entry.quantity,
                result,
            }
        })
        .collect();

    Order {
        entries,
        currency: catalog.currency(),
    }
}

fn solve_entry<'a>(
    catalog: &ProductCatalog<'a>,
    entry: &DemandEntry,
    settings: &OrderSettings,
) -> Result<OrderLine<'a>, OrderError> {
    let product = catalog
        .get(&entry.code)
        .ok_or_else(|| OrderError::UnknownProduct(entry.code.clone()))?;

    if entry.quantity > settings.max_quantity {
        return Err(OrderError::QuantityTooLarge {
            quantity: entry.quantity,
            limit: settings.max_quantity,
        });
    }

    Ok(settings.policy.solve(&product.packages, entry.quantity)?)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builds_reference_order() -> TestResult {
        let catalog = ProductCatalog::bakery()?;
        let demand = Demand::new().with("VS5", 10).with("MB11", 14).with("CF", 13);

        let order = build_order(&catalog, &demand, &OrderSettings::default());

        assert_eq!(order.failures().count(), 0);
        assert_eq!(order.line("VS5").map(OrderLine::total), Some(Money::from_minor(1798, USD)));
        assert_eq!(order.line("MB11").map(OrderLine::total), Some(Money::from_minor(5480, USD)));
        assert_eq!(order.line("CF").map(OrderLine::total), Some(Money::from_minor(2585, USD)));
        assert_eq!(order.total()?, Money::from_minor(9863, USD));

        Ok(())
    }

    #[test]
    fn unknown_products_do_not_stop_the_order() -> TestResult {
        let catalog = ProductCatalog::bakery()?;
        let demand = Demand::new().with("XX", 1).with("VS5", 10);

        let order = build_order(&catalog, &demand, &OrderSettings::default());

        let failures: Vec<(&str, &OrderError)> = order.failures().collect();

        assert_eq!(failures, vec![("XX", &OrderError::UnknownProduct("XX".to_string()))]);
        assert!(order.line("VS5").is_some());

        Ok(())
    }

    #[test]
    fn infeasible_lines_are_reported_not_emptied() -> TestResult {
        let catalog = ProductCatalog::bakery()?;
        let demand = Demand::new().with("VS5", 7).with("CF", 0);

        let order = build_order(&catalog, &demand, &OrderSettings::default());

        let vs5 = order.entry("VS5").ok_or("VS5 missing")?;

        assert_eq!(
            vs5.result().err(),
            Some(&OrderError::Solver(SolverError::Infeasible { quantity: 7 }))
        );

        let cf = order.line("CF").ok_or("CF missing")?;

        assert!(cf.is_empty());
        assert_eq!(order.total()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn round_up_policy_fills_infeasible_lines() -> TestResult {
        let catalog = ProductCatalog::bakery()?;
        let demand = Demand::new().with("VS5", 7);
        let settings = OrderSettings {
            policy: ShortfallPolicy::RoundUp,
            ..OrderSettings::default()
        };

        let order = build_order(&catalog, &demand, &settings);
        let line = order.line("VS5").ok_or("VS5 missing")?;

        // 8 = 3 + 5 and 10 = 5 + 5 both take two packs; 8 is cheaper
        assert_eq!(line.shipped(), 8);
        assert_eq!(line.package_count(), 2);
        assert_eq!(line.total(), Money::from_minor(1598, USD));

        Ok(())
    }

    #[test]
    fn rejects_quantities_over_the_limit() -> TestResult {
        let catalog = ProductCatalog::bakery()?;
        let demand = Demand::new().with("CF", 11);
        let settings = OrderSettings {
            max_quantity: 10,
            ..OrderSettings::default()
        };

        let order = build_order(&catalog, &demand, &settings);

        assert_eq!(
            order.entry("CF").and_then(|entry| entry.result().err()),
            Some(&OrderError::QuantityTooLarge {
                quantity: 11,
                limit: 10,
            })
        );

        Ok(())
    }
}
