//! Minimisation table

use std::num::NonZeroUsize;

use smallvec::SmallVec;

/// Fewest packs needed to reach every amount from zero up to a limit.
///
/// Built with the unbounded coin-change recurrence. Each reachable amount also
/// remembers the last pack size used to reach it, which is enough to walk back
/// one optimal combination. A priced table ranks combinations by pack count and
/// then by cost; an unpriced one by pack count alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizationTable {
    best: Vec<Option<(usize, i64)>>,
    chosen_size: Vec<Option<NonZeroUsize>>,
}

impl MinimizationTable {
    /// Builds the table for amounts `0..=limit`.
    ///
    /// Sizes are tried in the order given. An amount is only updated when a size
    /// gives strictly fewer packs, so on ties the earlier size keeps the slot.
    pub fn build(sizes: impl IntoIterator<Item = NonZeroUsize>, limit: usize) -> Self {
        Self::build_priced(sizes.into_iter().map(|size| (size, 0)), limit)
    }

    /// Builds the table for amounts `0..=limit` from `(size, price)` pairs, prices in
    /// minor units.
    ///
    /// Among combinations with the fewest packs the cheapest is kept. Remaining ties
    /// go to the earlier size.
    pub fn build_priced(
        packs: impl IntoIterator<Item = (NonZeroUsize, i64)>,
        limit: usize,
    ) -> Self {
        let len = limit.saturating_add(1);
        let mut best: Vec<Option<(usize, i64)>> = vec![None; len];
        let mut chosen_size: Vec<Option<NonZeroUsize>> = vec![None; len];

        if let Some(zero) = best.first_mut() {
            *zero = Some((0, 0));
        }

        for (size, price) in packs {
            let step = size.get();

            for amount in step..=limit {
                let previous = amount
                    .checked_sub(step)
                    .and_then(|rest| best.get(rest).copied().flatten());

                let Some((count, cost)) = previous else {
                    continue;
                };

                let candidate = (count.saturating_add(1), cost.saturating_add(price));

                let improves = best
                    .get(amount)
                    .copied()
                    .flatten()
                    .is_none_or(|current| candidate < current);

                if !improves {
                    continue;
                }

                if let Some(slot) = best.get_mut(amount) {
                    *slot = Some(candidate);
                }

                if let Some(slot) = chosen_size.get_mut(amount) {
                    *slot = Some(size);
                }
            }
        }

        Self { best, chosen_size }
    }

    /// Highest amount covered by the table.
    pub fn limit(&self) -> usize {
        self.best.len().saturating_sub(1)
    }

    /// Fewest packs summing exactly to `amount`, if any combination does.
    pub fn min_count(&self, amount: usize) -> Option<usize> {
        self.best.get(amount).copied().flatten().map(|(count, _)| count)
    }

    /// Cost in minor units of the combination kept for `amount`.
    ///
    /// Always zero for unpriced tables.
    pub fn min_cost(&self, amount: usize) -> Option<i64> {
        self.best.get(amount).copied().flatten().map(|(_, cost)| cost)
    }

    /// Size last added to reach `amount`.
    pub fn chosen_size(&self, amount: usize) -> Option<NonZeroUsize> {
        self.chosen_size.get(amount).copied().flatten()
    }

    /// Whether some combination sums exactly to `amount`.
    pub fn is_reachable(&self, amount: usize) -> bool {
        self.min_count(amount).is_some()
    }

    /// Walks back from `amount`, returning the sizes of one optimal combination.
    ///
    /// Returns `None` when `amount` is unreachable or outside the table. Zero
    /// reconstructs to an empty combination.
    pub fn reconstruct(&self, amount: usize) -> Option<SmallVec<[NonZeroUsize; 8]>> {
        let expected = self.min_count(amount)?;
        let mut sizes = SmallVec::with_capacity(expected);
        let mut remaining = amount;

        while remaining > 0 {
            let size = self.chosen_size(remaining)?;

            sizes.push(size);
            remaining = remaining.checked_sub(size.get())?;
        }

        (sizes.len() == expected).then_some(sizes)
    }
}
