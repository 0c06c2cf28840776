use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use walletmatrix_ingest::{load_dataset, IngestOptions};

const FEATURE_COUNT: usize = 24;
const WALLET_COUNT: usize = 40;

fn write_fixture(root: &Path) -> IngestOptions {
    let wallets_dir = root.join("wallets");
    let features_dir = root.join("features");
    fs::create_dir_all(&wallets_dir).expect("wallets dir");
    fs::create_dir_all(&features_dir).expect("features dir");

    let mut features = String::from("[");
    for idx in 0..FEATURE_COUNT {
        if idx > 0 {
            features.push(',');
        }
        write!(
            features,
            r#"{{"id":"feature{idx}","name":"Feature {idx}","description":"Benchmark feature {idx}","type":"lightning","category":"payments","order":{idx}}}"#
        )
        .expect("feature doc");
    }
    features.push(']');
    fs::write(features_dir.join("lightning.json"), features).expect("features file");

    for idx in 0..WALLET_COUNT {
        let mut doc = format!(
            r#"{{"name":"Wallet {idx}","website":"https://example.org/w{idx}","description":"Benchmark wallet {idx}","type":"lightning","order":{idx},"features":{{"#
        );
        for feature in 0..FEATURE_COUNT {
            if feature > 0 {
                doc.push(',');
            }
            if feature % 5 == 0 {
                write!(
                    doc,
                    r#""feature{feature}":{{"value":"custom","customText":"Wallet {idx} detail"}}"#
                )
                .expect("wallet entry");
            } else {
                write!(doc, r#""feature{feature}":"yes""#).expect("wallet entry");
            }
        }
        doc.push_str("}}");
        fs::write(wallets_dir.join(format!("wallet{idx:03}.json")), doc).expect("wallet file");
    }

    IngestOptions::new(wallets_dir, features_dir)
}

fn bench_load_throughput(c: &mut Criterion) {
    let root = tempdir().expect("tempdir");
    let opts = write_fixture(root.path());
    c.bench_function("load_generated_catalog", |b| {
        b.iter(|| load_dataset(&opts).expect("load benchmark"))
    });
}

criterion_group!(benches, bench_load_throughput);
criterion_main!(benches);
