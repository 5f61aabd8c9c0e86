//! Multi-key ranking of candidate renditions
//!
//! Provides [`RankingComparator`]. Requested keys are examined in the order
//! they were added to the request; the first key whose distances differ
//! decides. A key either candidate lacks contributes a tie, so partially
//! described candidates are ranked rather than dropped.

use am_media::{Criterion, DistanceRegistry, PropertyMapping, PropertyRequest};
use std::cmp::Ordering;

/// Comparator over property mappings built from one request
///
/// Criteria are resolved against the registry once, at construction.
#[derive(Debug, Clone)]
pub struct RankingComparator<'a> {
    criteria: Vec<Criterion<'a>>,
}

impl<'a> RankingComparator<'a> {
    /// Build comparator for `request`
    #[inline]
    #[must_use]
    pub fn new(registry: &'a DistanceRegistry, request: &'a PropertyRequest) -> Self {
        Self {
            criteria: registry.resolve(request),
        }
    }

    /// Whether every pair compares equal (nothing to rank by)
    #[inline]
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Compare two candidates; `Less` means `a` is the better match
    #[must_use]
    pub fn compare(&self, a: &PropertyMapping, b: &PropertyMapping) -> Ordering {
        for criterion in &self.criteria {
            let da = a.get(criterion.property).map(|v| criterion.measure(v));
            let db = b.get(criterion.property).map(|v| criterion.measure(v));

            if let (Some(da), Some(db)) = (da, db) {
                match da.cmp(&db) {
                    Ordering::Equal => {}
                    decided => return decided,
                }
            }
        }

        Ordering::Equal
    }

    /// Stable-sort `items` best match first
    ///
    /// Missing properties make the comparison intransitive, which the
    /// standard library sorts are allowed to panic on. Insertion sort only
    /// ever swaps strictly out-of-order neighbours, so it stays
    /// deterministic and never panics. Catalogues hold a handful of variants.
    pub fn sort<T, F>(&self, items: &mut [T], properties: F)
    where
        F: Fn(&T) -> &PropertyMapping,
    {
        if self.is_neutral() {
            return;
        }

        for i in 1..items.len() {
            let mut j = i;
            while j > 0
                && self.compare(properties(&items[j - 1]), properties(&items[j]))
                    == Ordering::Greater
            {
                items.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}
