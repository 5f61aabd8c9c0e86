//! Renditions and ranked rendition sequences

use crate::capability::ContentStream;
use crate::error::StorageError;
use am_media::{Location, MediaProperty, PropertyMapping, PropertyValue, VariantDefinition};
use std::fmt;
use std::sync::Arc;

type OpenFn = dyn Fn() -> Result<ContentStream, StorageError> + Send + Sync;

/// Deferred opener of a rendition's bytes
///
/// Nothing is read until [`open`](Self::open) is called; every call opens a
/// fresh stream.
#[derive(Clone)]
pub struct ContentSource(Arc<OpenFn>);

impl ContentSource {
    /// Wrap an opener
    pub fn new<F>(open: F) -> Self
    where
        F: Fn() -> Result<ContentStream, StorageError> + Send + Sync + 'static,
    {
        Self(Arc::new(open))
    }

    /// Open a new stream over the content
    ///
    /// # Errors
    /// Propagates the storage failure unchanged
    #[inline]
    pub fn open(&self) -> Result<ContentStream, StorageError> {
        (self.0)()
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentSource(..)")
    }
}

/// One variant of a source asset, as offered to a caller
#[derive(Debug, Clone)]
pub struct Rendition {
    variant: VariantDefinition,
    properties: PropertyMapping,
    location: Location,
    content: ContentSource,
}

impl Rendition {
    /// Create new rendition
    #[must_use]
    pub fn new(
        variant: VariantDefinition,
        properties: PropertyMapping,
        location: Location,
        content: ContentSource,
    ) -> Self {
        Self {
            variant,
            properties,
            location,
            content,
        }
    }

    #[inline]
    #[must_use]
    pub fn variant(&self) -> &VariantDefinition {
        &self.variant
    }

    #[inline]
    #[must_use]
    pub fn properties(&self) -> &PropertyMapping {
        &self.properties
    }

    /// Value of one property, `None` if unset
    #[inline]
    #[must_use]
    pub fn property(&self, property: MediaProperty) -> Option<&PropertyValue> {
        self.properties.get(property)
    }

    #[inline]
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Open the rendition's bytes
    ///
    /// The caller owns the stream; dropping it closes it.
    ///
    /// # Errors
    /// Propagates the storage failure unchanged
    #[inline]
    pub fn open_content(&self) -> Result<ContentStream, StorageError> {
        self.content.open()
    }
}

/// Renditions ordered best match first
///
/// Finite and re-iterable.
#[derive(Debug, Clone, Default)]
pub struct Renditions(Vec<Rendition>);

impl Renditions {
    /// No renditions
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Best match, if any
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Rendition> {
        self.0.first()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rendition> {
        self.0.iter()
    }

    /// Variant ids in rank order
    pub fn variant_ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.variant().id().as_str())
    }

    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<Rendition> {
        self.0
    }
}

impl From<Vec<Rendition>> for Renditions {
    fn from(renditions: Vec<Rendition>) -> Self {
        Self(renditions)
    }
}

impl IntoIterator for Renditions {
    type Item = Rendition;
    type IntoIter = std::vec::IntoIter<Rendition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Renditions {
    type Item = &'a Rendition;
    type IntoIter = std::slice::Iter<'a, Rendition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
