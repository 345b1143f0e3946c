//! Catalog files
//!
//! Product catalogs are YAML documents listing each product with the packs it is
//! sold in:
//!
//! ```yaml
//! products:
//!   - code: VS5
//!     name: Vegemite Scroll
//!     packs:
//!       - { size: 3, price: "6.99 USD" }
//!       - { size: 5, price: "8.99 USD" }
//! ```
//!
//! Packs are a sequence rather than a map so their order survives parsing.

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    packages::{Pack, PackageCatalog, PackageError},
    products::{Product, ProductCatalog, ProductError},
};

const BAKERY_YAML: &str = include_str!("../fixtures/catalogs/bakery.yml");

/// Catalog Parsing Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// No pack carries a price, so the currency is unknown
    #[error("Catalog has no priced packs; currency unknown")]
    NoCurrency,

    /// A product's packs are invalid
    #[error("Invalid packs for product {code}: {source}")]
    Package {
        /// Product code
        code: String,

        /// Underlying pack error
        source: PackageError,
    },

    /// Product catalog construction error
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Top level of a catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// Products in display order
    pub products: Vec<ProductEntry>,
}

/// Product entry
#[derive(Debug, Deserialize)]
pub struct ProductEntry {
    /// Product code
    pub code: String,

    /// Display name, defaults to the code
    #[serde(default)]
    pub name: Option<String>,

    /// Packs in the order they should be tried
    #[serde(default)]
    pub packs: Vec<PackEntry>,
}

/// Pack entry
#[derive(Debug, Deserialize)]
pub struct PackEntry {
    /// Units per pack
    pub size: usize,

    /// Pack price (e.g., "6.99 USD")
    pub price: String,
}

impl ProductEntry {
    fn into_product(self, currency: &'static Currency) -> Result<Product<'static>, CatalogError> {
        let packs = self
            .packs
            .iter()
            .map(|entry| {
                let (minor_units, pack_currency) = parse_price(&entry.price)?;

                Pack::new(entry.size, Money::from_minor(minor_units, pack_currency)).map_err(
                    |source| CatalogError::Package {
                        code: self.code.clone(),
                        source,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let packages =
            PackageCatalog::with_packs(packs, currency).map_err(|source| CatalogError::Package {
                code: self.code.clone(),
                source,
            })?;

        Ok(Product {
            name: self.name.unwrap_or_else(|| self.code.clone()),
            code: self.code,
            packages,
        })
    }
}

impl ProductCatalog<'static> {
    /// Parse a catalog from YAML.
    ///
    /// The catalog currency is taken from the first priced pack.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed, a price cannot be parsed,
    /// or the packs or products are inconsistent.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(yaml)?;

        let first_price = file
            .products
            .iter()
            .find_map(|product| product.packs.first())
            .ok_or(CatalogError::NoCurrency)?;

        let (_minor_units, currency) = parse_price(&first_price.price)?;

        let products = file
            .products
            .into_iter()
            .map(|entry| entry.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductCatalog::with_products(products, currency)?)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// The built-in bakery catalog (`VS5`, `MB11` and `CF`).
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled catalog fails to parse.
    pub fn bakery() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BAKERY_YAML)
    }
}

/// Parse price string (e.g., "6.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("6.99USD");

        assert!(matches!(result, Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("6.99 ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rounds_to_minor_units() -> TestResult {
        let (minor, currency) = parse_price("16.994 USD")?;

        assert_eq!(minor, 1699);
        assert_eq!(currency, USD);

        Ok(())
    }

    #[test]
    fn parse_price_accepts_gbp_and_eur() -> TestResult {
        let (gbp_minor, gbp) = parse_price("1.00 GBP")?;
        let (eur_minor, eur) = parse_price("2.50 EUR")?;

        assert_eq!(gbp_minor, 100);
        assert_eq!(gbp, GBP);
        assert_eq!(eur_minor, 250);
        assert_eq!(eur, EUR);

        Ok(())
    }

    #[test]
    fn bakery_catalog_parses() -> TestResult {
        let catalog = ProductCatalog::bakery()?;

        let codes: Vec<&str> = catalog.iter().map(|p| p.code.as_str()).collect();

        assert_eq!(codes, vec!["VS5", "MB11", "CF"]);
        assert_eq!(catalog.currency(), USD);

        let muffins = catalog.get("MB11").ok_or("MB11 missing")?;
        let sizes: Vec<usize> = muffins.packages.packs().iter().map(Pack::size).collect();

        assert_eq!(muffins.name, "Blueberry Muffins");
        assert_eq!(sizes, vec![8, 2, 5]);
        assert_eq!(muffins.packages.price_of(8), Some(Money::from_minor(2495, USD)));

        Ok(())
    }

    #[test]
    fn name_defaults_to_code() -> TestResult {
        let catalog = ProductCatalog::from_yaml_str(
            "products:\n  - code: XY\n    packs:\n      - { size: 4, price: \"1.00 GBP\" }\n",
        )?;

        assert_eq!(catalog.get("XY").map(|p| p.name.as_str()), Some("XY"));
        assert_eq!(catalog.currency(), GBP);

        Ok(())
    }

    #[test]
    fn rejects_catalog_without_prices() {
        let result = ProductCatalog::from_yaml_str("products:\n  - code: XY\n");

        assert!(matches!(result, Err(CatalogError::NoCurrency)));
    }

    #[test]
    fn rejects_zero_pack_sizes() {
        let result = ProductCatalog::from_yaml_str(
            "products:\n  - code: XY\n    packs:\n      - { size: 0, price: \"1.00 USD\" }\n",
        );

        assert!(matches!(
            result,
            Err(CatalogError::Package { code, source: PackageError::ZeroSize }) if code == "XY"
        ));
    }

    #[test]
    fn rejects_mixed_currencies() {
        let result = ProductCatalog::from_yaml_str(concat!(
            "products:\n",
            "  - code: A\n    packs:\n      - { size: 1, price: \"1.00 USD\" }\n",
            "  - code: B\n    packs:\n      - { size: 1, price: \"1.00 GBP\" }\n",
        ));

        assert!(matches!(
            result,
            Err(CatalogError::Package {
                source: PackageError::CurrencyMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn rejects_duplicate_products() {
        let result = ProductCatalog::from_yaml_str(concat!(
            "products:\n",
            "  - code: A\n    packs:\n      - { size: 1, price: \"1.00 USD\" }\n",
            "  - code: A\n    packs:\n      - { size: 2, price: \"1.50 USD\" }\n",
        ));

        assert!(matches!(
            result,
            Err(CatalogError::Product(ProductError::DuplicateCode(_)))
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = ProductCatalog::from_yaml_str("products: [");

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }
}
