//! Immutable collections of check-in targets.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::PointOfInterest;

/// Errors returned by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two targets shared an identifier.
    #[error("duplicate point of interest id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: u64,
    },
}

/// The fixed set of targets available to a session.
///
/// Catalogs are immutable once built. Cloning is cheap because the targets
/// live behind a shared slice, so many sessions can draw from one catalog.
///
/// # Examples
/// ```
/// use trailmark_core::{Catalog, PointOfInterest};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = Catalog::new([
///     PointOfInterest::new(1, "Munnar Hills", 10.0892, 77.0595, 1000.0, 50)?,
///     PointOfInterest::new(2, "Fort Kochi", 9.9669, 76.2406, 800.0, 30)?,
/// ])?;
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.total_points(), 80);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pois: Arc<[PointOfInterest]>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identifiers.
    ///
    /// Input order is preserved.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] for the first repeated id.
    pub fn new<I>(pois: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = PointOfInterest>,
    {
        let collected: Vec<PointOfInterest> = pois.into_iter().collect();
        let mut seen = HashSet::with_capacity(collected.len());
        if let Some(duplicate) = collected.iter().find(|poi| !seen.insert(poi.id())) {
            return Err(CatalogError::DuplicateId { id: duplicate.id() });
        }
        Ok(Self {
            pois: collected.into(),
        })
    }

    /// A catalog with no targets. Sessions built from it start complete.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    /// Report whether the catalog has no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Iterate over targets in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, PointOfInterest> {
        self.pois.iter()
    }

    /// Borrow the targets as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Look up a target by identifier.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&PointOfInterest> {
        self.pois.iter().find(|poi| poi.id() == id)
    }

    /// Report whether a target with `id` exists.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Sum of every target's reward.
    #[must_use]
    pub fn total_points(&self) -> u64 {
        self.pois.iter().map(|poi| u64::from(poi.points())).sum()
    }

    /// Targets whose ids are not in `visited`, in catalog order.
    #[must_use]
    pub fn unvisited(&self, visited: &BTreeSet<u64>) -> Vec<&PointOfInterest> {
        self.pois
            .iter()
            .filter(|poi| !visited.contains(&poi.id()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PointOfInterest;
    type IntoIter = std::slice::Iter<'a, PointOfInterest>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
