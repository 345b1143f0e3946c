//! Packwise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::CatalogError,
    orders::{
        Demand, DemandEntry, Order, OrderEntry, OrderError, OrderLine, OrderSettings, PackCount,
        build_order,
    },
    packages::{Pack, PackageCatalog, PackageError},
    pricing::TotalPriceError,
    products::{Product, ProductCatalog, ProductError, ProductKey},
    receipt::{Receipt, ReceiptError, ReceiptStyle},
    solvers::{
        ExactSolver, RoundUpSolver, ShortfallPolicy, Solver, SolverError, table::MinimizationTable,
    },
};
