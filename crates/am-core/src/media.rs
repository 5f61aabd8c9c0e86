//! Adaptive media facade
//!
//! [`AdaptiveMedia`] wires one set of capabilities into both engines so
//! callers deal with a single handle.

use crate::capability::{Processor, Storage, VariantCatalogue};
use crate::derivation::DerivationEngine;
use crate::error::MediaError;
use crate::rendition::Renditions;
use crate::resolution::ResolutionEngine;
use am_media::{DistanceRegistry, MediaQuery, PropertyRequest, SourceAsset};
use std::sync::Arc;

/// Derivation and resolution over shared capabilities
///
/// Cheap to clone; clones share the same collaborators.
#[derive(Debug, Clone)]
pub struct AdaptiveMedia {
    derivation: DerivationEngine,
    resolution: ResolutionEngine,
}

impl AdaptiveMedia {
    /// Create facade with the default distance registry
    #[must_use]
    pub fn new(
        processor: Arc<dyn Processor>,
        storage: Arc<dyn Storage>,
        catalogue: Arc<dyn VariantCatalogue>,
    ) -> Self {
        Self {
            derivation: DerivationEngine::new(
                Arc::clone(&processor),
                Arc::clone(&storage),
                Arc::clone(&catalogue),
            ),
            resolution: ResolutionEngine::new(processor, storage, catalogue),
        }
    }

    /// Rank with `distances` instead of the defaults
    #[must_use]
    pub fn with_distances(mut self, distances: DistanceRegistry) -> Self {
        self.resolution = self.resolution.with_distances(distances);
        self
    }

    #[inline]
    #[must_use]
    pub fn derivation(&self) -> &DerivationEngine {
        &self.derivation
    }

    #[inline]
    #[must_use]
    pub fn resolution(&self) -> &ResolutionEngine {
        &self.resolution
    }

    /// See [`DerivationEngine::process`]
    ///
    /// # Errors
    /// First generation or storage failure
    #[inline]
    pub fn process(&self, asset: &SourceAsset) -> Result<(), MediaError> {
        self.derivation.process(asset)
    }

    /// See [`DerivationEngine::process_all`]
    ///
    /// # Errors
    /// First failing asset
    #[inline]
    pub fn process_all<'a, I>(&self, assets: I) -> Result<usize, MediaError>
    where
        I: IntoIterator<Item = &'a SourceAsset>,
    {
        self.derivation.process_all(assets)
    }

    /// See [`DerivationEngine::clean_up`]
    ///
    /// # Errors
    /// Storage delete failure
    #[inline]
    pub fn clean_up(&self, asset: &SourceAsset) -> Result<(), MediaError> {
        self.derivation.clean_up(asset)
    }

    /// See [`ResolutionEngine::get_media`]
    #[inline]
    #[must_use]
    pub fn get_media(&self, asset: &SourceAsset, request: &PropertyRequest) -> Renditions {
        self.resolution.get_media(asset, request)
    }

    /// See [`ResolutionEngine::query`]
    #[inline]
    #[must_use]
    pub fn query(&self, query: &MediaQuery) -> Renditions {
        self.resolution.query(query)
    }
}
