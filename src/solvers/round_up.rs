//! Round-up solver

use tracing::debug;

use crate::{orders::line::OrderLine, packages::PackageCatalog};

use super::{ExactSolver, Solver, SolverError, line_from_walk, table::MinimizationTable};

/// Covers a quantity exactly when possible, otherwise ships the best cover above it.
///
/// When the quantity is unreachable, every reachable amount up to
/// `quantity + largest - 1` is a candidate and the winner has the fewest packs,
/// then the lowest cost, then the fewest surplus units. Amounts beyond that window
/// never win: dropping any pack from such a combination still covers the quantity.
///
/// A reachable quantity is always answered exactly, as [`ExactSolver`] would, even
/// when a larger amount needs fewer packs. With sizes 1 and 10, a request for 9
/// ships nine single packs rather than one pack of 10.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundUpSolver;

impl Solver for RoundUpSolver {
    fn solve<'a>(
        packages: &PackageCatalog<'a>,
        quantity: usize,
    ) -> Result<OrderLine<'a>, SolverError> {
        if quantity == 0 {
            return Ok(OrderLine::empty(0, packages.currency()));
        }

        let largest = packages
            .largest_size()
            .ok_or(SolverError::Infeasible { quantity })?;

        let limit = quantity
            .checked_add(largest.get() - 1)
            .ok_or(SolverError::QuantityOverflow { quantity })?;

        let table = MinimizationTable::build_priced(
            packages
                .packs()
                .iter()
                .map(|pack| (pack.non_zero_size(), pack.price().to_minor_units())),
            limit,
        );

        if table.is_reachable(quantity) {
            return ExactSolver::solve(packages, quantity);
        }

        let (packs, cost, amount) = (quantity..=limit)
            .filter_map(|amount| {
                Some((table.min_count(amount)?, table.min_cost(amount)?, amount))
            })
            .min()
            .ok_or(SolverError::Infeasible { quantity })?;

        let walk = table.reconstruct(amount).ok_or(SolverError::InvariantViolation {
            message: "reachable amount failed to reconstruct",
        })?;

        let line = line_from_walk(packages, quantity, &walk)?;

        debug!(quantity, shipped = amount, packs, cost, "no exact combination, rounded up");

        Ok(line)
    }
}
