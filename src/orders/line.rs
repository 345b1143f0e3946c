//! Order lines

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::pricing::{TotalPriceError, line_price, total_price};

/// A number of packs of one size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PackCount<'a> {
    size: usize,
    count: usize,
    unit_price: Money<'a, Currency>,
}

impl<'a> PackCount<'a> {
    /// Creates a count of `count` packs of `size` units at `unit_price` each.
    pub fn new(size: usize, count: usize, unit_price: Money<'a, Currency>) -> Self {
        Self {
            size,
            count,
            unit_price,
        }
    }

    /// Units per pack
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of packs
    pub fn count(&self) -> usize {
        self.count
    }

    /// Price of a single pack
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Units shipped by this line: `size * count`.
    pub fn units(&self) -> usize {
        self.size.saturating_mul(self.count)
    }

    /// Price of all packs on this line.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the price overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        line_price(self.unit_price, self.count)
    }
}

/// The packs chosen for one product, with their total cost.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderLine<'a> {
    requested: usize,
    packs: SmallVec<[PackCount<'a>; 4]>,
    total: Money<'a, Currency>,
}

impl<'a> OrderLine<'a> {
    /// A line with no packs and zero cost.
    pub fn empty(requested: usize, currency: &'a Currency) -> Self {
        Self {
            requested,
            packs: SmallVec::new(),
            total: Money::from_minor(0, currency),
        }
    }

    /// Creates a line from pack counts, ordering them by size and pricing them.
    ///
    /// Counts of zero are dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if pricing overflows or mixes currencies.
    pub fn new(
        requested: usize,
        packs: impl IntoIterator<Item = PackCount<'a>>,
        currency: &'a Currency,
    ) -> Result<Self, TotalPriceError> {
        let mut packs: SmallVec<[PackCount<'a>; 4]> =
            packs.into_iter().filter(|pack| pack.count > 0).collect();

        packs.sort_unstable_by_key(PackCount::size);

        let subtotals = packs
            .iter()
            .map(PackCount::subtotal)
            .collect::<Result<SmallVec<[Money<'a, Currency>; 4]>, _>>()?;

        let total = total_price(subtotals, currency)?;

        Ok(Self {
            requested,
            packs,
            total,
        })
    }

    /// Quantity the customer asked for
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Chosen packs, ascending by size
    pub fn packs(&self) -> &[PackCount<'a>] {
        &self.packs
    }

    /// Number of packs of the given size on this line.
    pub fn count_of(&self, size: usize) -> usize {
        self.packs
            .iter()
            .find(|pack| pack.size == size)
            .map_or(0, PackCount::count)
    }

    /// Total cost of the line
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Total number of packs.
    pub fn package_count(&self) -> usize {
        self.packs.iter().map(PackCount::count).sum()
    }

    /// Total number of units shipped.
    pub fn shipped(&self) -> usize {
        self.packs.iter().map(PackCount::units).sum()
    }

    /// Units shipped beyond the requested quantity.
    pub fn surplus(&self) -> usize {
        self.shipped().saturating_sub(self.requested)
    }

    /// Check if the line has no packs.
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
