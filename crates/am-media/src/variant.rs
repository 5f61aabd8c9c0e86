//! Variant definitions
//!
//! A [`VariantDefinition`] names one way of deriving a rendition from a
//! source asset. Definitions are owned by a tenant's catalogue.

use crate::property::PropertyMapping;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Generation parameter: maximum rendition width in pixels
pub const PARAM_MAX_WIDTH: &str = "max-width";

/// Generation parameter: maximum rendition height in pixels
pub const PARAM_MAX_HEIGHT: &str = "max-height";

/// Generation parameter: target mime type
pub const PARAM_MIME_TYPE: &str = "mime-type";

/// Unique identifier of a variant definition
///
/// UUID strings by convention, but any path-safe string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random (v4 UUID) identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VariantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VariantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for VariantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Named bag of generation parameters
///
/// Parameters keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDefinition {
    id: VariantId,
    name: String,
    #[serde(default)]
    parameters: IndexMap<String, String>,
}

impl VariantDefinition {
    /// Create definition without parameters
    #[must_use]
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters: IndexMap::new(),
        }
    }

    /// Add a generation parameter
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.insert(name.into(), value.to_string());
        self
    }

    /// Shorthand for the `max-width` parameter
    #[inline]
    #[must_use]
    pub fn with_max_width(self, width: u32) -> Self {
        self.with_parameter(PARAM_MAX_WIDTH, width)
    }

    /// Shorthand for the `max-height` parameter
    #[inline]
    #[must_use]
    pub fn with_max_height(self, height: u32) -> Self {
        self.with_parameter(PARAM_MAX_HEIGHT, height)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &VariantId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// Look up one generation parameter
    #[inline]
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Properties a rendition of this variant is declared to have
    #[inline]
    #[must_use]
    pub fn property_mapping(&self) -> PropertyMapping {
        PropertyMapping::from_parameters(&self.parameters)
    }
}
