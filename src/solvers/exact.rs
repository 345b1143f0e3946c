//! Exact solver

use tracing::trace;

use crate::{orders::line::OrderLine, packages::PackageCatalog};

use super::{Solver, SolverError, line_from_walk, table::MinimizationTable};

/// Covers a quantity exactly with the fewest packs, or reports it infeasible.
///
/// Never ships more than was asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver;

impl Solver for ExactSolver {
    fn solve<'a>(
        packages: &PackageCatalog<'a>,
        quantity: usize,
    ) -> Result<OrderLine<'a>, SolverError> {
        if quantity == 0 {
            return Ok(OrderLine::empty(0, packages.currency()));
        }

        let table = MinimizationTable::build(packages.sizes(), quantity);

        trace!(quantity, min_count = ?table.min_count(quantity), "built minimisation table");

        let walk = table
            .reconstruct(quantity)
            .ok_or(SolverError::Infeasible { quantity })?;

        line_from_walk(packages, quantity, &walk)
    }
}
