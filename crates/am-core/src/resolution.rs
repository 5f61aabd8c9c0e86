//! Resolution engine
//!
//! Offers the renditions of a source asset ranked by how closely their
//! properties match a request. Ranking reads metadata only; bytes are
//! opened when a caller asks for them.

use crate::capability::{Processor, Storage, VariantCatalogue};
use crate::ranking::RankingComparator;
use crate::rendition::{ContentSource, Rendition, Renditions};
use am_media::{DistanceRegistry, Location, MediaQuery, PropertyRequest, SourceAsset, VariantDefinition};
use std::sync::Arc;

/// Builds and ranks candidate renditions
#[derive(Clone)]
pub struct ResolutionEngine {
    processor: Arc<dyn Processor>,
    storage: Arc<dyn Storage>,
    catalogue: Arc<dyn VariantCatalogue>,
    distances: Arc<DistanceRegistry>,
}

impl ResolutionEngine {
    /// Create engine with the default distance registry
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
            distances: Arc::new(DistanceRegistry::with_defaults()),
        }
    }

    /// Replace the distance registry
    #[inline]
    #[must_use]
    pub fn with_distances(mut self, distances: DistanceRegistry) -> Self {
        self.distances = Arc::new(distances);
        self
    }

    #[inline]
    #[must_use]
    pub fn distances(&self) -> &DistanceRegistry {
        &self.distances
    }

    /// Renditions of `asset`, best match for `request` first
    ///
    /// Unsupported mime types yield no renditions. With an empty request
    /// the catalogue order is kept. Storage is not consulted: a rendition
    /// that was never stored fails only when its content is opened.
    #[must_use]
    pub fn get_media(&self, asset: &SourceAsset, request: &PropertyRequest) -> Renditions {
        if !self.processor.is_mime_type_supported(asset.mime_type()) {
            tracing::debug!(
                "No renditions for asset {}: unsupported mime type {}",
                asset.key(),
                asset.mime_type()
            );
            return Renditions::empty();
        }

        let variants = self.catalogue.variant_definitions_for(asset.tenant_id());
        let mut candidates = variants
            .iter()
            .map(|variant| self.create_rendition(asset, variant))
            .collect::<Vec<_>>();

        RankingComparator::new(&self.distances, request)
            .sort(&mut candidates, Rendition::properties);

        tracing::debug!(
            "Resolved {} renditions of asset {}",
            candidates.len(),
            asset.key()
        );
        Renditions::from(candidates)
    }

    /// Builder form of [`get_media`](Self::get_media)
    #[inline]
    #[must_use]
    pub fn query(&self, query: &MediaQuery) -> Renditions {
        self.get_media(query.asset(), query.request())
    }

    fn create_rendition(&self, asset: &SourceAsset, variant: &VariantDefinition) -> Rendition {
        let location = Location::build(asset, variant.id());

        let storage = Arc::clone(&self.storage);
        let owner = asset.clone();
        let definition = variant.clone();
        let content = ContentSource::new(move || storage.open_content(&owner, &definition));

        Rendition::new(
            variant.clone(),
            variant.property_mapping(),
            location,
            content,
        )
    }
}

impl std::fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("distances", &self.distances)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ContentStream, MockProcessor, MockStorage, MockVariantCatalogue};
    use am_media::{Distance, MediaProperty, PropertyValue};
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};

    fn asset() -> SourceAsset {
        SourceAsset::builder(1)
            .container(2)
            .repository(3)
            .content(4)
            .version(5)
            .mime_type("image/jpeg")
            .file_name("a b.jpg")
            .build()
    }

    fn supporting() -> MockProcessor {
        let mut processor = MockProcessor::new();
        processor
            .expect_is_mime_type_supported()
            .returning(|m| m.starts_with("image/"));
        processor.expect_generate().never();
        processor
    }

    fn catalogue(variants: Vec<VariantDefinition>) -> MockVariantCatalogue {
        let variants: Arc<[VariantDefinition]> = variants.into();
        let mut catalogue = MockVariantCatalogue::new();
        catalogue
            .expect_variant_definitions_for()
            .returning(move |_| Arc::clone(&variants));
        catalogue
    }

    fn untouched_storage() -> MockStorage {
        let mut storage = MockStorage::new();
        storage.expect_open_content().never();
        storage.expect_save().never();
        storage.expect_delete().never();
        storage
    }

    fn engine(p: MockProcessor, s: MockStorage, c: MockVariantCatalogue) -> ResolutionEngine {
        ResolutionEngine::new(Arc::new(p), Arc::new(s), Arc::new(c))
    }

    fn small_large() -> Vec<VariantDefinition> {
        vec![
            VariantDefinition::new("large", "Large").with_max_width(800),
            VariantDefinition::new("small", "Small").with_max_width(100),
        ]
    }

    #[test]
    fn ranks_by_width() {
        let engine = engine(supporting(), untouched_storage(), catalogue(small_large()));
        let request = PropertyRequest::new().with(MediaProperty::Width, 150);

        let renditions = engine.get_media(&asset(), &request);
        let ids: Vec<_> = renditions.variant_ids().collect();
        assert_eq!(ids, vec!["small", "large"]);
    }

    #[test]
    fn empty_request_keeps_catalogue_order() {
        let engine = engine(supporting(), untouched_storage(), catalogue(small_large()));

        let renditions = engine.get_media(&asset(), &PropertyRequest::new());
        let ids: Vec<_> = renditions.variant_ids().collect();
        assert_eq!(ids, vec!["large", "small"]);
    }

    #[test]
    fn unsupported_mime_type_yields_nothing() {
        let mut processor = MockProcessor::new();
        processor
            .expect_is_mime_type_supported()
            .returning(|_| false);
        let mut catalogue = MockVariantCatalogue::new();
        catalogue.expect_variant_definitions_for().never();

        let engine = engine(processor, untouched_storage(), catalogue);
        let request = PropertyRequest::new().with(MediaProperty::Width, 150);
        assert!(engine.get_media(&asset(), &request).is_empty());
    }

    #[test]
    fn renditions_carry_locations_and_properties() {
        let engine = engine(supporting(), untouched_storage(), catalogue(small_large()));
        let renditions = engine.get_media(&asset(), &PropertyRequest::new());

        let first = renditions.first().unwrap();
        assert_eq!(first.location().as_str(), "/adaptive/1/2/3/4/5/large/a%20b.jpg");
        assert_eq!(
            first.property(MediaProperty::Width),
            Some(&PropertyValue::Integer(800))
        );
        assert_eq!(first.property(MediaProperty::Height), None);
    }

    #[test]
    fn content_opened_only_on_demand() {
        let mut storage = MockStorage::new();
        storage
            .expect_open_content()
            .times(1)
            .returning(|_, v| Ok(Box::new(Cursor::new(v.name().as_bytes().to_vec())) as ContentStream));

        let engine = engine(supporting(), storage, catalogue(small_large()));
        let request = PropertyRequest::new().with(MediaProperty::Width, 150);
        let renditions = engine.get_media(&asset(), &request);

        let mut body = String::new();
        renditions
            .first()
            .unwrap()
            .open_content()
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "Small");
    }

    #[test]
    fn query_matches_get_media() {
        let engine = engine(supporting(), untouched_storage(), catalogue(small_large()));
        let query = MediaQuery::for_asset(asset()).with(MediaProperty::Width, 700);

        let ids: Vec<_> = engine
            .query(&query)
            .into_iter()
            .map(|r| r.variant().id().to_string())
            .collect();
        assert_eq!(ids, vec!["large", "small"]);
    }

    #[test]
    fn partially_described_variants_are_kept() {
        let variants = vec![
            VariantDefinition::new("plain", "Plain"),
            VariantDefinition::new("wide", "Wide").with_max_width(1200),
            VariantDefinition::new("narrow", "Narrow").with_max_width(300),
        ];
        let engine = engine(supporting(), untouched_storage(), catalogue(variants));
        let request = PropertyRequest::new()
            .with(MediaProperty::Width, 320)
            .with(MediaProperty::Height, 200);

        let renditions = engine.get_media(&asset(), &request);
        let ids: Vec<_> = renditions.variant_ids().collect();
        assert_eq!(ids, vec!["plain", "narrow", "wide"]);
    }

    #[test]
    fn custom_distances_apply() {
        let variants = vec![
            VariantDefinition::new("jpeg", "Jpeg").with_parameter("mime-type", "image/jpeg"),
            VariantDefinition::new("webp", "Webp").with_parameter("mime-type", "image/webp"),
            VariantDefinition::new("avif", "Avif").with_parameter("mime-type", "image/avif"),
        ];
        let registry = DistanceRegistry::with_defaults().with(
            MediaProperty::MimeType,
            Distance::ranked(["image/avif", "image/webp", "image/jpeg"]),
        );
        let engine = engine(supporting(), untouched_storage(), catalogue(variants))
            .with_distances(registry);
        let request = PropertyRequest::new().with(MediaProperty::MimeType, "image/avif");

        let renditions = engine.get_media(&asset(), &request);
        let ids: Vec<_> = renditions.variant_ids().collect();
        assert_eq!(ids, vec!["avif", "webp", "jpeg"]);
    }

    #[test]
    fn empty_file_name_still_resolves() {
        let engine = engine(
            supporting(),
            untouched_storage(),
            catalogue(vec![VariantDefinition::new("v", "V").with_max_width(100)]),
        );
        let nameless = SourceAsset::builder(1)
            .container(2)
            .repository(3)
            .content(4)
            .version(5)
            .mime_type("image/png")
            .build();

        let request = PropertyRequest::new().with(MediaProperty::Width, 150);
        let renditions = engine.get_media(&nameless, &request);
        assert_eq!(renditions.len(), 1);
        assert_eq!(
            renditions.first().unwrap().location().as_str(),
            "/adaptive/1/2/3/4/5/v/"
        );
    }
}
