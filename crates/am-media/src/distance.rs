//! Property distance functions
//!
//! Provides [`Distance`], a per-property closeness measure between an actual
//! and a requested value, and [`DistanceRegistry`], which maps each
//! [`MediaProperty`] to its distance function.
//!
//! Distances are used only to order candidates: 0 is an exact match and a
//! larger value is farther away. Callers compare distances, they never
//! subtract them.

use crate::property::{MediaProperty, PropertyValue};
use crate::request::PropertyRequest;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Distance of values that cannot be compared (mismatched kinds, unknown ranks)
pub const UNMATCHED: i64 = i64::MAX;

/// Signature of a caller-supplied distance function
pub type DistanceFn = dyn Fn(&PropertyValue, &PropertyValue) -> i64 + Send + Sync;

/// Distance function for one property
#[derive(Clone)]
pub enum Distance {
    /// `|actual - requested|` over integers
    Absolute,

    /// `actual - requested` over integers (saturating)
    Signed,

    /// 0 when equal, [`UNMATCHED`] otherwise
    Exact,

    /// Difference of positions in a fixed preference table
    Ranked(Vec<PropertyValue>),

    /// Caller-supplied function
    Custom(Arc<DistanceFn>),
}

impl Distance {
    /// Build a ranked distance from table entries, best first
    #[must_use]
    pub fn ranked<I, V>(table: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropertyValue>,
    {
        Self::Ranked(table.into_iter().map(Into::into).collect())
    }

    /// Wrap a closure as a distance function
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&PropertyValue, &PropertyValue) -> i64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Distance between `actual` and `requested`
    ///
    /// Total over all value pairs: anything that cannot be compared is
    /// [`UNMATCHED`].
    #[must_use]
    pub fn distance(&self, actual: &PropertyValue, requested: &PropertyValue) -> i64 {
        match self {
            Self::Absolute => match (actual.as_integer(), requested.as_integer()) {
                (Some(a), Some(r)) => i64::try_from(a.abs_diff(r)).unwrap_or(UNMATCHED),
                _ => UNMATCHED,
            },
            Self::Signed => match (actual.as_integer(), requested.as_integer()) {
                (Some(a), Some(r)) => a.saturating_sub(r),
                _ => UNMATCHED,
            },
            Self::Exact => {
                if actual == requested {
                    0
                } else {
                    UNMATCHED
                }
            }
            Self::Ranked(table) => {
                let rank = |v: &PropertyValue| table.iter().position(|t| t == v);
                match (rank(actual), rank(requested)) {
                    (Some(a), Some(r)) => i64::try_from(a.abs_diff(r)).unwrap_or(UNMATCHED),
                    _ => UNMATCHED,
                }
            }
            Self::Custom(f) => f(actual, requested),
        }
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => f.write_str("Absolute"),
            Self::Signed => f.write_str("Signed"),
            Self::Exact => f.write_str("Exact"),
            Self::Ranked(table) => f.debug_tuple("Ranked").field(table).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One ranking criterion: a requested value and the distance to measure it with
#[derive(Debug, Clone, Copy)]
pub struct Criterion<'a> {
    pub property: MediaProperty,
    pub requested: &'a PropertyValue,
    pub distance: &'a Distance,
}

impl Criterion<'_> {
    /// Distance of `actual` from the requested value
    #[inline]
    #[must_use]
    pub fn measure(&self, actual: &PropertyValue) -> i64 {
        self.distance.distance(actual, self.requested)
    }
}

/// Registry mapping properties to distance functions
#[derive(Debug, Clone, Default)]
pub struct DistanceRegistry {
    distances: HashMap<MediaProperty, Distance>,
}

impl DistanceRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            distances: HashMap::new(),
        }
    }

    /// Create registry with built-in distances
    ///
    /// - sizes (`width`, `height`, `content-length`) → [`Distance::Absolute`]
    /// - text (`mime-type`, `file-name`) → [`Distance::Exact`]
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for property in MediaProperty::ALL {
            let distance = if property.is_numeric() {
                Distance::Absolute
            } else {
                Distance::Exact
            };
            registry.register(property, distance);
        }
        registry
    }

    /// Register (or replace) the distance for `property`
    pub fn register(&mut self, property: MediaProperty, distance: Distance) {
        self.distances.insert(property, distance);
    }

    /// Builder form of [`register`](Self::register)
    #[inline]
    #[must_use]
    pub fn with(mut self, property: MediaProperty, distance: Distance) -> Self {
        self.register(property, distance);
        self
    }

    /// Remove the distance for `property`
    #[inline]
    pub fn remove(&mut self, property: MediaProperty) -> Option<Distance> {
        self.distances.remove(&property)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, property: MediaProperty) -> Option<&Distance> {
        self.distances.get(&property)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, property: MediaProperty) -> bool {
        self.distances.contains_key(&property)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Resolve a request into ranking criteria, in request order
    ///
    /// Keys without a preference are dropped. Keys with no registered
    /// distance are dropped too.
    #[must_use]
    pub fn resolve<'a>(&'a self, request: &'a PropertyRequest) -> Vec<Criterion<'a>> {
        request
            .preferences()
            .filter_map(|(property, requested)| match self.get(property) {
                Some(distance) => Some(Criterion {
                    property,
                    requested,
                    distance,
                }),
                None => {
                    tracing::debug!("No distance registered for {}, not ranking by it", property);
                    None
                }
            })
            .collect()
    }
}
