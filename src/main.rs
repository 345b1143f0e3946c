//! Packwise command line

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use packwise::{
    config::Config,
    input::collect_demand,
    observability::init_subscriber,
    orders::build_order,
    products::ProductCatalog,
    receipt::Receipt,
};

fn main() -> Result<()> {
    let config = Config::parse();

    init_subscriber(&config.logging)?;

    let catalog = match &config.catalog {
        Some(path) => ProductCatalog::from_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => ProductCatalog::bakery()?,
    };

    info!(products = catalog.len(), "catalog loaded");

    let demand = match config.demand() {
        Some(demand) => demand,
        None => collect_demand(&catalog, &mut io::stdin().lock(), &mut io::stdout())?,
    };

    let order = build_order(&catalog, &demand, &config.settings());

    Receipt::new(&order, &catalog).write_to(io::stdout().lock(), config.style)?;

    Ok(())
}
