//! Derivation engine
//!
//! Generates and stores one rendition per catalogue variant for a source
//! asset, and removes them again on clean-up.

use crate::capability::{ContentStream, Processor, Storage, VariantCatalogue};
use crate::error::MediaError;
use am_media::{SourceAsset, VariantDefinition};
use std::sync::Arc;

/// Orchestrates processor and storage for every variant of a tenant
///
/// Stateless between calls. Operations on different assets may run
/// concurrently; operations on the same asset are not serialised here.
#[derive(Clone)]
pub struct DerivationEngine {
    processor: Arc<dyn Processor>,
    storage: Arc<dyn Storage>,
    catalogue: Arc<dyn VariantCatalogue>,
}

impl DerivationEngine {
    /// Create engine from its collaborators
    #[must_use]
    pub fn new(
        processor: Arc<dyn Processor>,
        storage: Arc<dyn Storage>,
        catalogue: Arc<dyn VariantCatalogue>,
    ) -> Self {
        Self {
            processor,
            storage,
            catalogue,
        }
    }

    /// Generate and store every variant of `asset`
    ///
    /// Unsupported mime types are a no-op. Variants are processed in
    /// catalogue order; the first failure aborts the rest and renditions
    /// already stored are kept.
    ///
    /// # Errors
    /// - [`MediaError::Generation`] if the processor fails
    /// - [`MediaError::Storage`] if persisting fails
    pub fn process(&self, asset: &SourceAsset) -> Result<(), MediaError> {
        if !self.processor.is_mime_type_supported(asset.mime_type()) {
            tracing::debug!(
                "Skipping asset {}: unsupported mime type {}",
                asset.key(),
                asset.mime_type()
            );
            return Ok(());
        }

        let variants = self.catalogue.variant_definitions_for(asset.tenant_id());
        tracing::info!("Processing {} variants of asset {}", variants.len(), asset.key());

        for variant in variants.iter() {
            if let Err(e) = self.derive(asset, variant) {
                tracing::error!("Processing asset {} failed: {}", asset.key(), e);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Process assets in order, stopping at the first failure
    ///
    /// # Returns
    /// Number of assets processed (unsupported ones included)
    ///
    /// # Errors
    /// The first error returned by [`process`](Self::process)
    pub fn process_all<'a, I>(&self, assets: I) -> Result<usize, MediaError>
    where
        I: IntoIterator<Item = &'a SourceAsset>,
    {
        let mut count = 0;
        for asset in assets {
            self.process(asset)?;
            count += 1;
        }
        Ok(count)
    }

    /// Delete every stored rendition of `asset`
    ///
    /// Covers renditions of variants since removed from the catalogue.
    /// Unsupported mime types are a no-op; repeated calls are harmless.
    ///
    /// # Errors
    /// [`MediaError::Storage`] if the delete fails
    pub fn clean_up(&self, asset: &SourceAsset) -> Result<(), MediaError> {
        if !self.processor.is_mime_type_supported(asset.mime_type()) {
            tracing::debug!(
                "Skipping clean-up of asset {}: unsupported mime type {}",
                asset.key(),
                asset.mime_type()
            );
            return Ok(());
        }

        tracing::info!("Deleting renditions of asset {}", asset.key());
        self.storage
            .delete(asset)
            .map_err(|source| MediaError::Storage {
                asset: asset.key(),
                variant: None,
                source,
            })
    }

    fn derive(&self, asset: &SourceAsset, variant: &VariantDefinition) -> Result<(), MediaError> {
        let mut content: ContentStream =
            self.processor
                .generate(asset, variant)
                .map_err(|source| MediaError::Generation {
                    asset: asset.key(),
                    variant: variant.id().clone(),
                    source,
                })?;

        self.storage
            .save(asset, variant, &mut content)
            .map_err(|source| MediaError::Storage {
                asset: asset.key(),
                variant: Some(variant.id().clone()),
                source,
            })?;

        tracing::debug!("Stored variant {} of asset {}", variant.id(), asset.key());
        Ok(())
    }
}

impl std::fmt::Debug for DerivationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivationEngine").finish_non_exhaustive()
    }
}
