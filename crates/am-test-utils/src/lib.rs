//! Testing utilities for the adaptive media workspace
//!
//! In-memory capability implementations, fixtures and logging setup.

#![allow(missing_docs)]

use am_config::StaticCatalogue;
use am_core::{
    AdaptiveMedia, ContentStream, GenerationError, Processor, Storage, StorageError,
};
use am_media::{RenditionKey, SourceAsset, TenantId, VariantDefinition, VariantId};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Storage keeping rendition bytes in a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    blobs: DashMap<RenditionKey, Arc<[u8]>>,
    failing: RwLock<HashSet<VariantId>>,
    saves: AtomicUsize,
    opens: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every save of `variant` fail with a backend error
    pub fn fail_saves_for(&self, variant: impl Into<VariantId>) {
        self.failing.write().insert(variant.into());
    }

    #[must_use]
    pub fn contains(&self, asset: &SourceAsset, variant: &VariantId) -> bool {
        self.blobs.contains_key(&asset.key().rendition(variant))
    }

    /// Stored bytes, without counting as an open
    #[must_use]
    pub fn stored(&self, asset: &SourceAsset, variant: &VariantId) -> Option<Vec<u8>> {
        self.blobs
            .get(&asset.key().rendition(variant))
            .map(|bytes| bytes.to_vec())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl Storage for InMemoryStorage {
    fn save(
        &self,
        asset: &SourceAsset,
        variant: &VariantDefinition,
        content: &mut dyn Read,
    ) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.failing.read().contains(variant.id()) {
            return Err(StorageError::Backend(format!(
                "rejected {}",
                asset.key().rendition(variant.id())
            )));
        }

        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes)?;
        self.blobs
            .insert(asset.key().rendition(variant.id()), bytes.into());
        Ok(())
    }

    fn open_content(
        &self,
        asset: &SourceAsset,
        variant: &VariantDefinition,
    ) -> Result<ContentStream, StorageError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let key = asset.key().rendition(variant.id());
        let bytes = self
            .blobs
            .get(&key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(StorageError::NotFound(key))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn delete(&self, asset: &SourceAsset) -> Result<(), StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let key = asset.key();
        self.blobs.retain(|k, _| k.asset != key);
        Ok(())
    }
}

/// Processor that "renders" a variant as a short text payload
#[derive(Debug)]
pub struct StubProcessor {
    mime_types: HashSet<String>,
    failing: RwLock<HashSet<VariantId>>,
    generated: AtomicUsize,
}

impl StubProcessor {
    /// Support exactly `mime_types`
    pub fn new<I, S>(mime_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mime_types: mime_types.into_iter().map(Into::into).collect(),
            failing: RwLock::new(HashSet::new()),
            generated: AtomicUsize::new(0),
        }
    }

    /// Support the common raster image types
    #[must_use]
    pub fn images() -> Self {
        Self::new(["image/jpeg", "image/png", "image/gif", "image/webp"])
    }

    /// Make generation of `variant` fail with a codec error
    pub fn fail_for(&self, variant: impl Into<VariantId>) {
        self.failing.write().insert(variant.into());
    }

    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }

    /// Payload produced for `variant` of `asset`
    #[must_use]
    pub fn payload(asset: &SourceAsset, variant: &VariantDefinition) -> Vec<u8> {
        asset.key().rendition(variant.id()).to_string().into_bytes()
    }
}

impl Processor for StubProcessor {
    fn is_mime_type_supported(&self, mime_type: &str) -> bool {
        self.mime_types.contains(mime_type)
    }

    fn generate(
        &self,
        asset: &SourceAsset,
        variant: &VariantDefinition,
    ) -> Result<ContentStream, GenerationError> {
        self.generated.fetch_add(1, Ordering::SeqCst);
        if self.failing.read().contains(variant.id()) {
            return Err(GenerationError::Codec(format!("cannot render {}", variant.id())));
        }
        Ok(Box::new(Cursor::new(Self::payload(asset, variant))))
    }
}

/// Tenant used by the fixtures
pub const TEST_TENANT: TenantId = TenantId(1);

/// JPEG asset at (1, 2, 3, 4, 5) named `a b.jpg`
#[must_use]
pub fn sample_asset() -> SourceAsset {
    sample_asset_with_mime("image/jpeg")
}

#[must_use]
pub fn sample_asset_with_mime(mime_type: &str) -> SourceAsset {
    SourceAsset::builder(TEST_TENANT)
        .container(2)
        .repository(3)
        .content(4)
        .version(5)
        .mime_type(mime_type)
        .file_name("a b.jpg")
        .build()
}

/// `small` (max-width 100) then `large` (max-width 800)
#[must_use]
pub fn small_large_variants() -> Vec<VariantDefinition> {
    vec![
        VariantDefinition::new("small", "Small").with_max_width(100),
        VariantDefinition::new("large", "Large").with_max_width(800),
    ]
}

/// Catalogue holding [`small_large_variants`] for [`TEST_TENANT`]
#[must_use]
pub fn small_large_catalogue() -> StaticCatalogue {
    let catalogue = StaticCatalogue::new();
    for variant in small_large_variants() {
        catalogue
            .upsert_variant(TEST_TENANT, variant)
            .expect("fixture variants are valid");
    }
    catalogue
}

/// Facade wired to in-memory collaborators, which stay inspectable
#[derive(Debug, Clone)]
pub struct TestMedia {
    pub media: AdaptiveMedia,
    pub processor: Arc<StubProcessor>,
    pub storage: Arc<InMemoryStorage>,
    pub catalogue: Arc<StaticCatalogue>,
}

impl TestMedia {
    #[must_use]
    pub fn new(catalogue: StaticCatalogue) -> Self {
        let processor = Arc::new(StubProcessor::images());
        let storage = Arc::new(InMemoryStorage::new());
        let catalogue = Arc::new(catalogue);
        let media = AdaptiveMedia::new(processor.clone(), storage.clone(), catalogue.clone());
        Self {
            media,
            processor,
            storage,
            catalogue,
        }
    }
}

/// [`TestMedia`] over [`small_large_catalogue`]
#[must_use]
pub fn setup_test_media() -> TestMedia {
    TestMedia::new(small_large_catalogue())
}

/// Route `tracing` output to the test harness; honours `RUST_LOG`
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
