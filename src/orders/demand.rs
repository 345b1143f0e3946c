//! Demand

use std::{num::ParseIntError, str::FromStr};

use thiserror::Error;

/// Requested quantities per product code, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demand {
    entries: Vec<DemandEntry>,
}

impl Demand {
    /// Create an empty demand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for a product, returning the previous quantity.
    ///
    /// A product that was already present keeps its position.
    pub fn insert(&mut self, code: impl Into<String>, quantity: usize) -> Option<usize> {
        let code = code.into();

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.code == code) {
            return Some(std::mem::replace(&mut entry.quantity, quantity));
        }

        self.entries.push(DemandEntry { code, quantity });

        None
    }

    /// Builder form of [`Demand::insert`].
    #[must_use]
    pub fn with(mut self, code: impl Into<String>, quantity: usize) -> Self {
        self.insert(code, quantity);
        self
    }

    /// Requested quantity for a product.
    pub fn quantity(&self, code: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.quantity)
    }

    /// Entries in the order they were first inserted.
    pub fn iter(&self) -> impl Iterator<Item = &DemandEntry> {
        self.entries.iter()
    }

    /// Number of products requested
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<DemandEntry> for Demand {
    fn from_iter<I: IntoIterator<Item = DemandEntry>>(iter: I) -> Self {
        let mut demand = Demand::new();

        for entry in iter {
            demand.insert(entry.code, entry.quantity);
        }

        demand
    }
}

/// A requested quantity for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandEntry {
    /// Product code
    pub code: String,

    /// Requested units
    pub quantity: usize,
}

/// Errors parsing a `CODE=QUANTITY` demand entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DemandEntryError {
    /// The entry has no `=`.
    #[error("expected CODE=QUANTITY, got {0:?}")]
    MissingSeparator(String),

    /// The code before `=` is blank.
    #[error("missing product code in {0:?}")]
    MissingCode(String),

    /// The quantity is not a non-negative integer.
    #[error("invalid quantity in {entry:?}: {source}")]
    InvalidQuantity {
        /// The full entry
        entry: String,

        /// Integer parse failure
        source: ParseIntError,
    },
}

impl FromStr for DemandEntry {
    type Err = DemandEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, quantity) = s
            .split_once('=')
            .ok_or_else(|| DemandEntryError::MissingSeparator(s.to_string()))?;

        let code = code.trim();

        if code.is_empty() {
            return Err(DemandEntryError::MissingCode(s.to_string()));
        }

        let quantity = quantity
            .trim()
            .parse::<usize>()
            .map_err(|source| DemandEntryError::InvalidQuantity {
                entry: s.to_string(),
                source,
            })?;

        Ok(Self {
            code: code.to_string(),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut demand = Demand::new().with("VS5", 10).with("MB11", 14);

        assert_eq!(demand.insert("VS5", 3), Some(10));

        let entries: Vec<(&str, usize)> = demand
            .iter()
            .map(|entry| (entry.code.as_str(), entry.quantity))
            .collect();

        assert_eq!(entries, vec![("VS5", 3), ("MB11", 14)]);
        assert_eq!(demand.len(), 2);
    }

    #[test]
    fn quantity_lookup() {
        let demand = Demand::new().with("CF", 13);

        assert_eq!(demand.quantity("CF"), Some(13));
        assert_eq!(demand.quantity("VS5"), None);
    }

    #[test]
    fn parses_entries() -> TestResult {
        let entry: DemandEntry = " VS5 = 10 ".parse()?;

        assert_eq!(
            entry,
            DemandEntry {
                code: "VS5".to_string(),
                quantity: 10,
            }
        );

        Ok(())
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            "VS5".parse::<DemandEntry>(),
            Err(DemandEntryError::MissingSeparator("VS5".to_string()))
        );
    }

    #[test]
    fn rejects_missing_code() {
        assert_eq!(
            "=4".parse::<DemandEntry>(),
            Err(DemandEntryError::MissingCode("=4".to_string()))
        );
    }

    #[test]
    fn rejects_negative_and_fractional_quantities() {
        assert!(matches!(
            "VS5=-1".parse::<DemandEntry>(),
            Err(DemandEntryError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            "VS5=1.5".parse::<DemandEntry>(),
            Err(DemandEntryError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn collects_entries_into_demand() {
        let demand: Demand = [
            DemandEntry {
                code: "VS5".to_string(),
                quantity: 1,
            },
            DemandEntry {
                code: "VS5".to_string(),
                quantity: 2,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(demand.quantity("VS5"), Some(2));
        assert_eq!(demand.len(), 1);
    }
}
