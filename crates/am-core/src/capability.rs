//! Capability interfaces consumed by the engines
//!
//! The engines never decode images, touch blobs or read configuration
//! themselves. They are handed implementations of these traits at
//! construction time.

use crate::error::{GenerationError, StorageError};
use am_media::{SourceAsset, TenantId, VariantDefinition};
use std::io::Read;
use std::sync::Arc;

/// Byte stream of a rendition, closed when dropped
pub type ContentStream = Box<dyn Read + Send>;

/// Produces rendition bytes from a source asset
#[cfg_attr(test, mockall::automock)]
pub trait Processor: Send + Sync {
    /// Whether assets of this mime type can be processed at all
    fn is_mime_type_supported(&self, mime_type: &str) -> bool;

    /// Generate the rendition of `variant` for `asset`
    ///
    /// # Errors
    /// Returns [`GenerationError`] on codec or IO failure
    fn generate(
        &self,
        asset: &SourceAsset,
        variant: &VariantDefinition,
    ) -> Result<ContentStream, GenerationError>;
}

/// Persists and serves rendition bytes
///
/// Each call is expected to be atomic for one (asset, variant) pair.
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    /// Persist the rendition of `variant` for `asset`
    ///
    /// # Errors
    /// Returns [`StorageError`] if the bytes cannot be read or written
    fn save(
        &self,
        asset: &SourceAsset,
        variant: &VariantDefinition,
        content: &mut dyn Read,
    ) -> Result<(), StorageError>;

    /// Open the stored rendition of `variant` for `asset`
    ///
    /// # Errors
    /// Returns [`StorageError::NotFound`] if nothing is stored
    fn open_content(
        &self,
        asset: &SourceAsset,
        variant: &VariantDefinition,
    ) -> Result<ContentStream, StorageError>;

    /// Delete every stored rendition of `asset`
    ///
    /// Must cover renditions of variants no longer in the catalogue, and
    /// succeed when nothing is stored.
    ///
    /// # Errors
    /// Returns [`StorageError`] on backend failure
    fn delete(&self, asset: &SourceAsset) -> Result<(), StorageError>;
}

/// Per-tenant source of variant definitions
#[cfg_attr(test, mockall::automock)]
pub trait VariantCatalogue: Send + Sync {
    /// Snapshot of the tenant's variant definitions, in catalogue order
    ///
    /// Unknown tenants have an empty catalogue.
    fn variant_definitions_for(&self, tenant_id: TenantId) -> Arc<[VariantDefinition]>;
}
