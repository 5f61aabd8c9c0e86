//! Media properties and property mappings
//!
//! Provides [`MediaProperty`] (the closed set of rankable keys),
//! [`PropertyValue`] and [`PropertyMapping`], the properties a rendition
//! is declared to have.

use crate::variant::{PARAM_MAX_HEIGHT, PARAM_MAX_WIDTH, PARAM_MIME_TYPE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Property key a rendition can be described and ranked by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaProperty {
    /// Width in pixels
    Width,

    /// Height in pixels
    Height,

    /// Size of the content in bytes
    ContentLength,

    /// Mime type of the content
    MimeType,

    /// File name of the content
    FileName,
}

impl MediaProperty {
    /// Every known property, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Width,
        Self::Height,
        Self::ContentLength,
        Self::MimeType,
        Self::FileName,
    ];

    /// Stable string name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::ContentLength => "content-length",
            Self::MimeType => "mime-type",
            Self::FileName => "file-name",
        }
    }

    /// Whether values of this property are integers
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Width | Self::Height | Self::ContentLength)
    }
}

impl Display for MediaProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MediaProperty {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| PropertyError::UnknownProperty(s.to_string()))
    }
}

/// Errors related to property parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// Property name not recognised
    #[error("unknown media property: '{0}'")]
    UnknownProperty(String),

    /// Value does not fit the property
    #[error("invalid value '{value}' for property {property}")]
    InvalidValue {
        property: MediaProperty,
        value: String,
    },
}

/// Value of a media property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Integer value (sizes, lengths)
    Integer(i64),

    /// Text value (mime types, names)
    Text(String),
}

impl PropertyValue {
    /// Integer payload, if any
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text payload, if any
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            Self::Integer(_) => None,
        }
    }

    /// Parse a raw string as a value of `property`
    ///
    /// # Errors
    /// Returns error if a numeric property is given a non-integer
    pub fn parse_for(property: MediaProperty, raw: &str) -> Result<Self, PropertyError> {
        if property.is_numeric() {
            raw.trim()
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| PropertyError::InvalidValue {
                    property,
                    value: raw.to_string(),
                })
        } else {
            Ok(Self::Text(raw.to_string()))
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Properties a rendition has
///
/// Querying an unset property yields `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping(IndexMap<MediaProperty, PropertyValue>);

impl PropertyMapping {
    /// Create empty mapping
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build mapping from variant generation parameters
    ///
    /// `max-width` and `max-height` become [`MediaProperty::Width`] and
    /// [`MediaProperty::Height`], `mime-type` becomes
    /// [`MediaProperty::MimeType`]. A size that does not parse leaves the
    /// property unset.
    #[must_use]
    pub fn from_parameters(parameters: &IndexMap<String, String>) -> Self {
        let mut mapping = Self::new();

        for (name, raw) in parameters {
            let property = match name.as_str() {
                PARAM_MAX_WIDTH => MediaProperty::Width,
                PARAM_MAX_HEIGHT => MediaProperty::Height,
                PARAM_MIME_TYPE => MediaProperty::MimeType,
                _ => continue,
            };

            match PropertyValue::parse_for(property, raw) {
                Ok(value) => {
                    mapping.0.insert(property, value);
                }
                Err(e) => {
                    tracing::warn!("Ignoring parameter {}: {}", name, e);
                }
            }
        }

        mapping
    }

    /// Set a property, returning the mapping
    #[inline]
    #[must_use]
    pub fn with(mut self, property: MediaProperty, value: impl Into<PropertyValue>) -> Self {
        self.0.insert(property, value.into());
        self
    }

    /// Set a property in place
    #[inline]
    pub fn insert(&mut self, property: MediaProperty, value: impl Into<PropertyValue>) {
        self.0.insert(property, value.into());
    }

    /// Value of a property, `None` if unset
    #[inline]
    #[must_use]
    pub fn get(&self, property: MediaProperty) -> Option<&PropertyValue> {
        self.0.get(&property)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, property: MediaProperty) -> bool {
        self.0.contains_key(&property)
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

    pub fn iter(&self) -> impl Iterator<Item = (MediaProperty, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(MediaProperty, PropertyValue)> for PropertyMapping {
    fn from_iter<I: IntoIterator<Item = (MediaProperty, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn property_names_round_trip() {
        for property in MediaProperty::ALL {
            assert_eq!(property.name().parse::<MediaProperty>(), Ok(property));
        }
    }

    #[test]
    fn unknown_property_name() {
        let result = "density".parse::<MediaProperty>();
        assert!(matches!(result, Err(PropertyError::UnknownProperty(_))));
    }

    #[test]
    fn property_serde_uses_kebab_case() {
        let json = serde_json::to_string(&MediaProperty::ContentLength).unwrap();
        assert_eq!(json, "\"content-length\"");
    }

    #[test]
    fn parse_numeric_value() {
        let value = PropertyValue::parse_for(MediaProperty::Width, " 320 ").unwrap();
        assert_eq!(value, PropertyValue::Integer(320));

        let err = PropertyValue::parse_for(MediaProperty::Height, "tall");
        assert!(matches!(err, Err(PropertyError::InvalidValue { .. })));
    }

    #[test]
    fn parse_text_value() {
        let value = PropertyValue::parse_for(MediaProperty::MimeType, "image/png").unwrap();
        assert_eq!(value.as_text(), Some("image/png"));
        assert_eq!(value.as_integer(), None);
    }

    #[test]
    fn mapping_from_parameters() {
        let mapping = PropertyMapping::from_parameters(&params(&[
            ("max-width", "100"),
            ("max-height", "75"),
            ("mime-type", "image/webp"),
            ("quality", "0.8"),
        ]));

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get(MediaProperty::Width), Some(&PropertyValue::Integer(100)));
        assert_eq!(mapping.get(MediaProperty::Height), Some(&PropertyValue::Integer(75)));
        assert_eq!(
            mapping.get(MediaProperty::MimeType),
            Some(&PropertyValue::from("image/webp"))
        );
    }

    #[test]
    fn mapping_skips_unparseable_sizes() {
        let mapping = PropertyMapping::from_parameters(&params(&[
            ("max-width", "wide"),
            ("max-height", "200"),
        ]));

        assert!(!mapping.contains(MediaProperty::Width));
        assert_eq!(mapping.get(MediaProperty::Height), Some(&PropertyValue::Integer(200)));
    }

    #[test]
    fn unset_property_is_none() {
        let mapping = PropertyMapping::new().with(MediaProperty::Width, 10);
        assert!(mapping.get(MediaProperty::FileName).is_none());
    }

    #[test]
    fn value_serde_untagged() {
        let v: PropertyValue = serde_json::from_str("42").unwrap();
        assert_eq!(v, PropertyValue::Integer(42));
        let v: PropertyValue = serde_json::from_str("\"jpeg\"").unwrap();
        assert_eq!(v, PropertyValue::from("jpeg"));
    }
}
