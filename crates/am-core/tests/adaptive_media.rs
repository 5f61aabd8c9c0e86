//! End-to-end behaviour of the facade over in-memory collaborators

use am_config::{AdaptiveMediaConfig, StaticCatalogue};
use am_core::{MediaError, StorageError, VariantCatalogue};
use am_media::{
    Distance, DistanceRegistry, MediaProperty, MediaQuery, PropertyRequest, VariantDefinition,
    VariantId,
};
use am_test_utils::{
    init_test_logging, sample_asset, sample_asset_with_mime, setup_test_media, StubProcessor,
    TestMedia, TEST_TENANT,
};
use pretty_assertions::assert_eq;
use std::io::Read;
use std::sync::Arc;
use std::thread;

fn ranked_ids(test: &TestMedia, request: &PropertyRequest) -> Vec<String> {
    test.media
        .get_media(&sample_asset(), request)
        .variant_ids()
        .map(str::to_owned)
        .collect()
}

#[test]
fn small_and_large_scenario() {
    init_test_logging();
    let test = setup_test_media();
    let asset = sample_asset();

    test.media.process(&asset).unwrap();
    assert_eq!(test.storage.len(), 2);

    let request = PropertyRequest::new().with(MediaProperty::Width, 150);
    assert_eq!(ranked_ids(&test, &request), vec!["small", "large"]);
    assert_eq!(test.storage.open_count(), 0);
}

#[test]
fn process_calls_collaborators_once_per_variant() {
    let test = setup_test_media();
    test.catalogue
        .upsert_variant(TEST_TENANT, VariantDefinition::new("medium", "Medium").with_max_width(400))
        .unwrap();

    test.media.process(&sample_asset()).unwrap();
    assert_eq!(test.processor.generated_count(), 3);
    assert_eq!(test.storage.save_count(), 3);
}

#[test]
fn stored_content_is_readable() {
    let test = setup_test_media();
    let asset = sample_asset();
    test.media.process(&asset).unwrap();

    let request = PropertyRequest::new().with(MediaProperty::Width, 900);
    let renditions = test.media.get_media(&asset, &request);
    let best = renditions.first().unwrap();
    assert_eq!(best.location().as_str(), "/adaptive/1/2/3/4/5/large/a%20b.jpg");

    let mut bytes = Vec::new();
    best.open_content().unwrap().read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, StubProcessor::payload(&asset, best.variant()));
    assert_eq!(test.storage.open_count(), 1);
}

#[test]
fn unsupported_asset_is_ignored_everywhere() {
    let test = setup_test_media();
    let pdf = sample_asset_with_mime("application/pdf");

    test.media.process(&pdf).unwrap();
    test.media.clean_up(&pdf).unwrap();
    let renditions = test
        .media
        .get_media(&pdf, &PropertyRequest::new().with(MediaProperty::Width, 100));

    assert!(renditions.is_empty());
    assert_eq!(test.processor.generated_count(), 0);
    assert_eq!(test.storage.save_count(), 0);
    assert_eq!(test.storage.delete_count(), 0);
}

#[test]
fn clean_up_without_process_offers_catalogue_candidates_that_fail_on_open() {
    let test = setup_test_media();
    let asset = sample_asset();

    test.media.clean_up(&asset).unwrap();
    test.media.clean_up(&asset).unwrap();
    assert!(test.storage.is_empty());

    let renditions = test.media.get_media(&asset, &PropertyRequest::new());
    assert_eq!(renditions.len(), 2);
    for rendition in &renditions {
        assert!(matches!(rendition.open_content(), Err(StorageError::NotFound(_))));
    }
}

#[test]
fn clean_up_removes_renditions_of_retired_variants() {
    let test = setup_test_media();
    let asset = sample_asset();
    test.media.process(&asset).unwrap();

    assert!(test.catalogue.remove_variant(TEST_TENANT, &VariantId::new("large")));
    test.media.clean_up(&asset).unwrap();

    assert!(!test.storage.contains(&asset, &VariantId::new("large")));
    assert!(test.storage.is_empty());
}

#[test]
fn generation_failure_keeps_earlier_renditions() {
    let test = setup_test_media();
    test.processor.fail_for("large");
    let asset = sample_asset();

    let err = test.media.process(&asset).unwrap_err();
    assert!(matches!(err, MediaError::Generation { .. }));
    assert_eq!(err.variant(), Some(&VariantId::new("large")));
    assert!(!err.is_retryable());

    assert!(test.storage.contains(&asset, &VariantId::new("small")));
    assert!(!test.storage.contains(&asset, &VariantId::new("large")));
}

#[test]
fn storage_failure_is_wrapped_with_context() {
    let test = setup_test_media();
    test.storage.fail_saves_for("small");

    let err = test.media.process(&sample_asset()).unwrap_err();
    match err {
        MediaError::Storage {
            variant: Some(variant),
            source: StorageError::Backend(_),
            ..
        } => assert_eq!(variant.as_str(), "small"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(test.processor.generated_count(), 1);
}

#[test]
fn empty_request_keeps_catalogue_order() {
    let test = setup_test_media();
    assert_eq!(ranked_ids(&test, &PropertyRequest::new()), vec!["small", "large"]);
}

#[test]
fn tenants_are_isolated() {
    let config = AdaptiveMediaConfig::from_yaml_str(
        r"
tenants:
  - tenant_id: 1
    variants:
      - { id: small, name: Small, parameters: { max-width: 100 } }
  - tenant_id: 2
    variants:
      - { id: poster, name: Poster, parameters: { max-width: 2000 } }
      - { id: icon, name: Icon, parameters: { max-width: 32 } }
",
    )
    .unwrap();
    let test = TestMedia::new(StaticCatalogue::from_config(&config).unwrap());

    let other = am_media::SourceAsset::builder(2)
        .mime_type("image/png")
        .file_name("logo.png")
        .build();
    test.media.process_all([&sample_asset(), &other]).unwrap();
    assert_eq!(test.storage.len(), 3);

    let request = PropertyRequest::new().with(MediaProperty::Width, 40);
    let ids: Vec<_> = test
        .media
        .get_media(&other, &request)
        .variant_ids()
        .map(str::to_owned)
        .collect();
    assert_eq!(ids, vec!["icon", "poster"]);
    assert_eq!(test.catalogue.variant_definitions_for(TEST_TENANT).len(), 1);
}

#[test]
fn query_with_custom_distance() {
    let test = setup_test_media();
    let media = test
        .media
        .clone()
        .with_distances(DistanceRegistry::with_defaults().with(MediaProperty::Width, Distance::Signed));

    // Signed distance favours the narrowest rendition
    let query = MediaQuery::for_asset(sample_asset()).with(MediaProperty::Width, 900);
    let ids: Vec<_> = media
        .query(&query)
        .variant_ids()
        .map(str::to_owned)
        .collect();
    assert_eq!(ids, vec!["small", "large"]);
}

#[test]
fn concurrent_processing_of_distinct_assets() {
    let test = Arc::new(setup_test_media());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let test = Arc::clone(&test);
            thread::spawn(move || {
                let asset = am_media::SourceAsset::builder(TEST_TENANT)
                    .content(i)
                    .mime_type("image/png")
                    .file_name(format!("frame-{i}.png"))
                    .build();
                test.media.process(&asset).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(test.storage.len(), 16);
    assert_eq!(test.processor.generated_count(), 16);
}

#[test]
fn nameless_asset_round_trips() {
    let test = setup_test_media();
    let asset = am_media::SourceAsset::builder(TEST_TENANT)
        .content(9)
        .mime_type("image/jpeg")
        .build();

    test.media.process(&asset).unwrap();
    assert_eq!(test.storage.len(), 2);

    let request = PropertyRequest::new().with(MediaProperty::Width, 150);
    let renditions = test.media.get_media(&asset, &request);
    assert_eq!(renditions.variant_ids().collect::<Vec<_>>(), vec!["small", "large"]);

    let best = renditions.first().unwrap();
    assert_eq!(best.location().as_str(), "/adaptive/1/0/0/9/0/small/");

    let mut bytes = Vec::new();
    best.open_content().unwrap().read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, StubProcessor::payload(&asset, best.variant()));
}
