//! Solvers for package orders
//!
//! A solver turns a requested quantity into the fewest packs that cover it. Both
//! solvers share the [`table::MinimizationTable`]; they differ in what happens when
//! no combination adds up to the quantity exactly.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::{
    orders::line::{OrderLine, PackCount},
    packages::PackageCatalog,
    pricing::TotalPriceError,
};

pub mod exact;
pub mod round_up;
pub mod table;

pub use exact::ExactSolver;
pub use round_up::RoundUpSolver;

/// Solver Errors
#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    /// No combination of the available packs satisfies the quantity.
    #[error("no combination of packs adds up to {quantity}")]
    Infeasible {
        /// Requested quantity
        quantity: usize,
    },

    /// The search range past the requested quantity does not fit in `usize`.
    #[error("quantity {quantity} is too large to round up")]
    QuantityOverflow {
        /// Requested quantity
        quantity: usize,
    },

    /// Wrapped pricing error.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Trait for choosing packs to cover a quantity
pub trait Solver {
    /// Choose packs from `packages` covering `quantity` units.
    ///
    /// A quantity of zero always yields an empty line.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if no acceptable combination exists or it cannot be priced.
    fn solve<'a>(
        packages: &PackageCatalog<'a>,
        quantity: usize,
    ) -> Result<OrderLine<'a>, SolverError>;
}

/// What to do when no combination of packs sums exactly to the requested quantity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ShortfallPolicy {
    /// Report the quantity as infeasible.
    #[default]
    Exact,

    /// Ship the cheapest, smallest cover with the fewest packs above the quantity.
    RoundUp,
}

impl ShortfallPolicy {
    /// Solves with the solver implementing this policy.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] from the underlying solver.
    pub fn solve<'a>(
        self,
        packages: &PackageCatalog<'a>,
        quantity: usize,
    ) -> Result<OrderLine<'a>, SolverError> {
        match self {
            ShortfallPolicy::Exact => ExactSolver::solve(packages, quantity),
            ShortfallPolicy::RoundUp => RoundUpSolver::solve(packages, quantity),
        }
    }
}

/// Tallies a reconstructed walk into a priced order line.
fn line_from_walk<'a>(
    packages: &PackageCatalog<'a>,
    requested: usize,
    walk: &[NonZeroUsize],
) -> Result<OrderLine<'a>, SolverError> {
    let counts = packages.packs().iter().map(|pack| {
        let count = walk
            .iter()
            .filter(|size| **size == pack.non_zero_size())
            .count();

        PackCount::new(pack.size(), count, pack.price())
    });

    let line = OrderLine::new(requested, counts, packages.currency())?;

    if line.package_count() != walk.len() {
        return Err(SolverError::InvariantViolation {
            message: "reconstructed pack size missing from catalog",
        });
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::packages::Pack;

    use super::*;

    fn packages() -> Result<PackageCatalog<'static>, crate::packages::PackageError> {
        PackageCatalog::with_packs([Pack::new(2, Money::from_minor(100, USD))?], USD)
    }

    #[test]
    fn exact_policy_reports_unreachable_quantities() -> TestResult {
        let result = ShortfallPolicy::Exact.solve(&packages()?, 7);

        assert_eq!(result, Err(SolverError::Infeasible { quantity: 7 }));

        Ok(())
    }

    #[test]
    fn round_up_policy_covers_unreachable_quantities() -> TestResult {
        let line = ShortfallPolicy::RoundUp.solve(&packages()?, 7)?;

        assert_eq!(line.count_of(2), 4);
        assert_eq!(line.total(), Money::from_minor(400, USD));

        Ok(())
    }

    #[test]
    fn default_policy_is_exact() {
        assert_eq!(ShortfallPolicy::default(), ShortfallPolicy::Exact);
    }

    #[test]
    fn line_from_walk_rejects_unknown_sizes() -> TestResult {
        let walk = [NonZeroUsize::new(3).ok_or("non-zero")?];

        let result = line_from_walk(&packages()?, 3, &walk);

        assert!(matches!(
            result,
            Err(SolverError::InvariantViolation { .. })
        ));

        Ok(())
    }
}
