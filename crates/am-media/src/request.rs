//! Property requests and media queries

use crate::asset::SourceAsset;
use crate::property::{MediaProperty, PropertyValue};
use indexmap::IndexMap;

/// Requested property values, in the order they were added
///
/// A `None` value records the key with no preference; it is never used
/// for ranking. Re-adding a key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRequest(IndexMap<MediaProperty, Option<PropertyValue>>);

impl PropertyRequest {
    /// Create empty request
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Request a value for `property`
    #[inline]
    #[must_use]
    pub fn with(mut self, property: MediaProperty, value: impl Into<PropertyValue>) -> Self {
        self.insert(property, Some(value.into()));
        self
    }

    /// Record `property` with no preference
    #[inline]
    #[must_use]
    pub fn without_preference(mut self, property: MediaProperty) -> Self {
        self.insert(property, None);
        self
    }

    /// Set (or clear) the requested value for `property`
    #[inline]
    pub fn insert(&mut self, property: MediaProperty, value: Option<PropertyValue>) {
        self.0.insert(property, value);
    }

    /// Requested value for `property`, `None` if absent or no preference
    #[inline]
    #[must_use]
    pub fn get(&self, property: MediaProperty) -> Option<&PropertyValue> {
        self.0.get(&property).and_then(Option::as_ref)
    }

    /// All keys with their requested values, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (MediaProperty, Option<&PropertyValue>)> {
        self.0.iter().map(|(k, v)| (*k, v.as_ref()))
    }

    /// Keys that carry a preference, in insertion order
    pub fn preferences(&self) -> impl Iterator<Item = (MediaProperty, &PropertyValue)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (*k, v)))
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
}

impl FromIterator<(MediaProperty, PropertyValue)> for PropertyRequest {
    fn from_iter<I: IntoIterator<Item = (MediaProperty, PropertyValue)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (k, v) in iter {
            request.insert(k, Some(v));
        }
        request
    }
}

/// A source asset together with the properties wanted from its renditions
///
/// # Example
///
/// ```rust
/// use am_media::{MediaProperty, MediaQuery, SourceAsset};
///
/// let asset = SourceAsset::builder(1).mime_type("image/png").file_name("a.png").build();
/// let query = MediaQuery::for_asset(asset).with(MediaProperty::Width, 150);
/// assert_eq!(query.request().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MediaQuery {
    asset: SourceAsset,
    request: PropertyRequest,
}

impl MediaQuery {
    /// Start a query for `asset`
    #[inline]
    #[must_use]
    pub fn for_asset(asset: SourceAsset) -> Self {
        Self {
            asset,
            request: PropertyRequest::new(),
        }
    }

    /// Request a value for `property`
    #[inline]
    #[must_use]
    pub fn with(mut self, property: MediaProperty, value: impl Into<PropertyValue>) -> Self {
        self.request = self.request.with(property, value);
        self
    }

    /// Replace the whole request
    #[inline]
    #[must_use]
    pub fn with_request(mut self, request: PropertyRequest) -> Self {
        self.request = request;
        self
    }

    #[inline]
    #[must_use]
    pub fn asset(&self) -> &SourceAsset {
        &self.asset
    }

    #[inline]
    #[must_use]
    pub fn request(&self) -> &PropertyRequest {
        &self.request
    }

    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (SourceAsset, PropertyRequest) {
        (self.asset, self.request)
    }
}
