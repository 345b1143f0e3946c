//! Products

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::packages::PackageCatalog;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors raised while building a product catalog.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Two products share a code.
    #[error("product code {0} is listed more than once")]
    DuplicateCode(String),

    /// A product's packs are priced in a different currency from the catalog.
    #[error("product {code} is priced in {actual}, but the catalog uses {expected}")]
    CurrencyMismatch {
        /// Product code
        code: String,

        /// Catalog currency code
        expected: &'static str,

        /// Product currency code
        actual: &'static str,
    },
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product code, e.g. `VS5`
    pub code: String,

    /// Display name
    pub name: String,

    /// Packs the product is sold in
    pub packages: PackageCatalog<'a>,
}

/// Every product on sale, indexed by code.
#[derive(Debug, Clone)]
pub struct ProductCatalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    codes: FxHashMap<String, ProductKey>,
    order: Vec<ProductKey>,
    currency: &'static Currency,
}

impl<'a> ProductCatalog<'a> {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            codes: FxHashMap::default(),
            order: Vec::new(),
            currency,
        }
    }

    /// Create a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if codes repeat or currencies differ.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, ProductError> {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// - [`ProductError::DuplicateCode`]: a product with the same code exists.
    /// - [`ProductError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, ProductError> {
        if self.codes.contains_key(&product.code) {
            return Err(ProductError::DuplicateCode(product.code));
        }

        let product_currency = product.packages.currency();

        if product_currency != self.currency {
            return Err(ProductError::CurrencyMismatch {
                code: product.code,
                expected: self.currency.iso_alpha_code,
                actual: product_currency.iso_alpha_code,
            });
        }

        let code = product.code.clone();
        let key = self.products.insert(product);

        self.codes.insert(code, key);
        self.order.push(key);

        Ok(key)
    }

    /// Get a product by its code
    pub fn get(&self, code: &str) -> Option<&Product<'a>> {
        self.key(code).and_then(|key| self.products.get(key))
    }

    /// Get a product key by its code
    pub fn key(&self, code: &str) -> Option<ProductKey> {
        self.codes.get(code).copied()
    }

    /// Get a product by its key
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Products in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Currency every product is priced in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
