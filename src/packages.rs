//! Packages

use std::num::NonZeroUsize;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while building a package catalog.
#[derive(Debug, Error, PartialEq)]
pub enum PackageError {
    /// A pack must contain at least one unit.
    #[error("pack size must be greater than zero")]
    ZeroSize,

    /// The same pack size was listed twice.
    #[error("pack size {0} is listed more than once")]
    DuplicateSize(usize),

    /// A pack price was below zero.
    #[error("pack of {size} has a negative price")]
    NegativePrice {
        /// Size of the offending pack
        size: usize,
    },

    /// A pack is priced in a different currency from the catalog.
    #[error("pack of {size} is priced in {actual}, but the catalog uses {expected}")]
    CurrencyMismatch {
        /// Size of the offending pack
        size: usize,

        /// Catalog currency code
        expected: &'static str,

        /// Pack currency code
        actual: &'static str,
    },
}

/// A purchasable package: a fixed number of units at a fixed price.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pack<'a> {
    size: NonZeroUsize,
    price: Money<'a, Currency>,
}

impl<'a> Pack<'a> {
    /// Creates a pack of `size` units costing `price`.
    ///
    /// # Errors
    ///
    /// - [`PackageError::ZeroSize`]: `size` is zero.
    /// - [`PackageError::NegativePrice`]: `price` is below zero.
    pub fn new(size: usize, price: Money<'a, Currency>) -> Result<Self, PackageError> {
        let size = NonZeroUsize::new(size).ok_or(PackageError::ZeroSize)?;

        if price.to_minor_units() < 0 {
            return Err(PackageError::NegativePrice { size: size.get() });
        }

        Ok(Self { size, price })
    }

    /// Number of units in the pack
    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub(crate) fn non_zero_size(&self) -> NonZeroUsize {
        self.size
    }

    /// Price of one pack
    pub fn price(&self) -> Money<'a, Currency> {
        self.price
    }
}

/// The packs a single product is sold in.
///
/// Packs keep the order they were declared in. The optimiser tries sizes in that
/// order, so it decides which of several equally small combinations is reported.
#[derive(Clone, Debug)]
pub struct PackageCatalog<'a> {
    packs: SmallVec<[Pack<'a>; 4]>,
    currency: &'static Currency,
}

impl<'a> PackageCatalog<'a> {
    /// Creates an empty catalog. Every positive quantity is infeasible against it.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            packs: SmallVec::new(),
            currency,
        }
    }

    /// Creates a catalog from packs in declaration order.
    ///
    /// # Errors
    ///
    /// - [`PackageError::DuplicateSize`]: two packs share a size.
    /// - [`PackageError::CurrencyMismatch`]: a pack is not priced in `currency`.
    pub fn with_packs(
        packs: impl IntoIterator<Item = Pack<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, PackageError> {
        let mut catalog = Self::new(currency);

        for pack in packs {
            let pack_currency = pack.price.currency();

            if pack_currency != currency {
                return Err(PackageError::CurrencyMismatch {
                    size: pack.size(),
                    expected: currency.iso_alpha_code,
                    actual: pack_currency.iso_alpha_code,
                });
            }

            if catalog.pack(pack.size()).is_some() {
                return Err(PackageError::DuplicateSize(pack.size()));
            }

            catalog.packs.push(pack);
        }

        Ok(catalog)
    }

    /// Packs in declaration order
    pub fn packs(&self) -> &[Pack<'a>] {
        &self.packs
    }

    /// Pack sizes in declaration order
    pub fn sizes(&self) -> impl Iterator<Item = NonZeroUsize> + '_ {
        self.packs.iter().map(Pack::non_zero_size)
    }

    /// Looks up the pack with the given size.
    pub fn pack(&self, size: usize) -> Option<&Pack<'a>> {
        self.packs.iter().find(|pack| pack.size() == size)
    }

    /// Unit price of the pack with the given size.
    pub fn price_of(&self, size: usize) -> Option<Money<'a, Currency>> {
        self.pack(size).map(Pack::price)
    }

    /// The largest pack size on offer.
    pub fn largest_size(&self) -> Option<NonZeroUsize> {
        self.sizes().max()
    }

    /// Currency every pack is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of pack sizes on offer.
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    /// Check if no packs are on offer.
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
