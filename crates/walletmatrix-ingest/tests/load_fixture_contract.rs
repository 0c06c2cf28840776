// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use tempfile::tempdir;
use walletmatrix_ingest::{load_dataset, seed_catalog, IngestOptions, LoadOutcome};
use walletmatrix_model::{assemble_views, FeatureId, ValueTag, WalletId};

const FEATURES_DOC: &str = r#"[
  {"id":"onChain","name":"On-Chain","description":"On-chain support","type":"lightning","category":"payments","order":1},
  {"id":"invoice","name":"Invoice","description":"BOLT11 invoices","type":"lightning","category":"payments","order":2}
]"#;

fn options(root: &Path) -> IngestOptions {
    let wallets = root.join("wallets");
    let features = root.join("features");
    fs::create_dir_all(&wallets).expect("wallets dir");
    fs::create_dir_all(&features).expect("features dir");
    IngestOptions::new(wallets, features)
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write fixture");
}

fn loaded(opts: &IngestOptions) -> walletmatrix_ingest::DatasetLoad {
    match load_dataset(opts).expect("load") {
        LoadOutcome::Loaded(load) => load,
        LoadOutcome::NoData => panic!("expected loaded dataset, got no data"),
    }
}

#[test]
fn wallets_features_and_associations_load_from_documents() {
    let dir = tempdir().expect("tmp");
    let opts = options(dir.path());
    write(&opts.features_dir.join("lightning.json"), FEATURES_DOC);
    write(
        &opts.wallets_dir.join("phoenix.json"),
        r#"{
          "name": "Phoenix",
          "website": "https://phoenix.acinq.co",
          "description": "ACINQ wallet",
          "type": "lightning",
          "order": 1,
          "features": {
            "onChain": "yes",
            "invoice": {"value": "custom", "customText": "Receive Only"}
          }
        }"#,
    );

    let load = loaded(&opts);
    assert_eq!(load.catalog.wallet_count(), 1);
    assert_eq!(load.catalog.feature_count(), 2);
    assert_eq!(load.catalog.association_count(), 2);
    assert!(!load.report.has_warnings());

    let invoice = load
        .catalog
        .association(WalletId::new(1), FeatureId::new(2))
        .expect("invoice association");
    assert_eq!(invoice.value.tag(), ValueTag::Custom);
    assert_eq!(invoice.value.custom_text(), Some("Receive Only"));

    let on_chain = load
        .catalog
        .association(WalletId::new(1), FeatureId::new(1))
        .expect("on-chain association");
    assert_eq!(on_chain.value.tag(), ValueTag::Yes);
    assert_eq!(on_chain.value.custom_text(), None);
}

#[test]
fn canonical_key_and_normalized_alias_resolve_to_the_same_feature() {
    let dir = tempdir().expect("tmp");
    let opts = options(dir.path());
    write(&opts.features_dir.join("lightning.json"), FEATURES_DOC);
    write(
        &opts.wallets_dir.join("phoenix.json"),
        r#"{"name":"Phoenix","website":"https://phoenix.acinq.co","description":"",
            "type":"lightning","order":1,"features":{"onChain":"yes"}}"#,
    );
    write(
        &opts.wallets_dir.join("zeus.json"),
        r#"{"name":"Zeus","website":"https://zeusln.com","description":"",
            "type":"lightning","order":2,"features":{"on_chain":"partial"}}"#,
    );

    let load = loaded(&opts);
    assert_eq!(load.catalog.association_count(), 2);
    let direct = load
        .catalog
        .association(WalletId::new(1), FeatureId::new(1))
        .expect("canonical key association");
    let aliased = load
        .catalog
        .association(WalletId::new(2), FeatureId::new(1))
        .expect("alias key association");
    assert_eq!(direct.feature_id, aliased.feature_id);
    assert_eq!(aliased.value.tag(), ValueTag::Partial);
}

#[test]
fn unknown_feature_key_drops_only_that_entry() {
    let dir = tempdir().expect("tmp");
    let opts = options(dir.path());
    write(&opts.features_dir.join("lightning.json"), FEATURES_DOC);
    write(
        &opts.wallets_dir.join("phoenix.json"),
        r#"{"name":"Phoenix","website":"https://phoenix.acinq.co","description":"",
            "type":"lightning","order":1,
            "features":{"onChain":"yes","nonexistent":"yes"}}"#,
    );

    let load = loaded(&opts);
    assert_eq!(load.catalog.wallet_count(), 1);
    assert_eq!(load.catalog.association_count(), 1);
    assert_eq!(load.report.unresolved_keys.len(), 1);
    assert!(load.report.unresolved_keys[0].contains("nonexistent"));
    assert!(load.report.unresolved_keys[0].contains("onChain"));
}

#[test]
fn empty_source_directories_signal_no_data() {
    let dir = tempdir().expect("tmp");
    let opts = options(dir.path());
    assert!(matches!(
        load_dataset(&opts).expect("load"),
        LoadOutcome::NoData
    ));
}

#[test]
fn absent_source_directories_signal_no_data() {
    let dir = tempdir().expect("tmp");
    let opts = IngestOptions::new(
        dir.path().join("missing-wallets"),
        dir.path().join("missing-features"),
    );
    assert!(matches!(
        load_dataset(&opts).expect("load"),
        LoadOutcome::NoData
    ));
}

#[test]
fn seed_catalog_covers_the_assembly_paths() {
    let seed = seed_catalog();
    assert!(seed.wallet_count() >= 3);
    assert!(seed.feature_count() >= 3);

    let views = assemble_views(&seed, None, None);
    assert_eq!(views.len(), seed.wallet_count());
    assert!(views.iter().all(|v| !v.features.is_empty()));
    assert!(views
        .iter()
        .flat_map(|v| v.features.iter())
        .any(|e| e.value == ValueTag::Custom && e.custom_text.is_some()));
    assert!(views
        .iter()
        .flat_map(|v| v.features.iter())
        .any(|e| e.reference_link.is_some()));
    assert!(views
        .iter()
        .flat_map(|v| v.features.iter())
        .any(|e| e.notes.is_some()));
}

#[test]
fn load_events_track_the_pipeline_stages() {
    let dir = tempdir().expect("tmp");
    let opts = options(dir.path());
    write(&opts.features_dir.join("lightning.json"), FEATURES_DOC);
    write(
        &opts.wallets_dir.join("phoenix.json"),
        r#"{"name":"Phoenix","website":"https://phoenix.acinq.co","description":"",
            "type":"lightning","order":1,"features":{"onChain":"yes"}}"#,
    );

    let load = loaded(&opts);
    let names: Vec<&str> = load.events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names.first().copied(), Some("load.start"));
    assert_eq!(names.last().copied(), Some("load.complete"));
    assert!(names.contains(&"resolver.ready"));
}
