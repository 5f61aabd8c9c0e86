//! Source assets and the keys derived from them
//!
//! A [`SourceAsset`] is the origin content a rendition is derived from. It is
//! owned by the hosting repository; this crate only reads it.

use crate::variant::VariantId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Tenant (company) identifier
///
/// Isolation boundary for variant catalogues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub i64);

impl TenantId {
    /// Create new tenant id
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for TenantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TenantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for TenantId {
    fn from(id: i32) -> Self {
        Self(i64::from(id))
    }
}

/// Integer identity of a source asset
///
/// Everything needed to address an asset's renditions, without the
/// descriptive fields (mime type, file name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    pub tenant_id: TenantId,
    pub container_id: i64,
    pub repository_id: i64,
    pub content_id: i64,
    pub content_version_id: i64,
}

impl AssetKey {
    /// Rendition key for one variant of this asset
    #[inline]
    #[must_use]
    pub fn rendition(&self, variant_id: &VariantId) -> RenditionKey {
        RenditionKey {
            asset: *self,
            variant_id: variant_id.clone(),
        }
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.tenant_id,
            self.container_id,
            self.repository_id,
            self.content_id,
            self.content_version_id
        )
    }
}

/// Persistence key of a single rendition
///
/// Composite of the asset identity and the variant id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RenditionKey {
    pub asset: AssetKey,
    pub variant_id: VariantId,
}

impl Display for RenditionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset, self.variant_id)
    }
}

/// Origin content a set of renditions is derived from
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceAsset {
    key: AssetKey,
    mime_type: String,
    file_name: String,
}

impl SourceAsset {
    /// Create new source asset
    #[must_use]
    pub fn new(key: AssetKey, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            key,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Start building an asset from its tenant id
    #[inline]
    #[must_use]
    pub fn builder(tenant_id: impl Into<TenantId>) -> SourceAssetBuilder {
        SourceAssetBuilder::new(tenant_id.into())
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> AssetKey {
        self.key
    }

    #[inline]
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.key.tenant_id
    }

    #[inline]
    #[must_use]
    pub fn container_id(&self) -> i64 {
        self.key.container_id
    }

    #[inline]
    #[must_use]
    pub fn repository_id(&self) -> i64 {
        self.key.repository_id
    }

    #[inline]
    #[must_use]
    pub fn content_id(&self) -> i64 {
        self.key.content_id
    }

    #[inline]
    #[must_use]
    pub fn content_version_id(&self) -> i64 {
        self.key.content_version_id
    }

    #[inline]
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Display for SourceAsset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.key, self.file_name, self.mime_type)
    }
}

/// Builder for [`SourceAsset`]
#[derive(Debug, Clone)]
pub struct SourceAssetBuilder {
    key: AssetKey,
    mime_type: String,
    file_name: String,
}

impl SourceAssetBuilder {
    fn new(tenant_id: TenantId) -> Self {
        Self {
            key: AssetKey {
                tenant_id,
                container_id: 0,
                repository_id: 0,
                content_id: 0,
                content_version_id: 0,
            },
            mime_type: String::new(),
            file_name: String::new(),
        }
    }

    #[must_use]
    pub fn container(mut self, id: i64) -> Self {
        self.key.container_id = id;
        self
    }

    #[must_use]
    pub fn repository(mut self, id: i64) -> Self {
        self.key.repository_id = id;
        self
    }

    #[must_use]
    pub fn content(mut self, id: i64) -> Self {
        self.key.content_id = id;
        self
    }

    #[must_use]
    pub fn version(mut self, id: i64) -> Self {
        self.key.content_version_id = id;
        self
    }

    #[must_use]
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    #[must_use]
    pub fn build(self) -> SourceAsset {
        SourceAsset {
            key: self.key,
            mime_type: self.mime_type,
            file_name: self.file_name,
        }
    }
}
