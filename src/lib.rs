//! Packwise
//!
//! Packwise works out which packs to ship for an order. Each product is sold in a
//! handful of pack sizes; for a requested quantity it finds the combination with the
//! fewest packs and prices it.

pub mod catalog;
pub mod config;
pub mod input;
pub mod observability;
pub mod orders;
pub mod packages;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod solvers;
