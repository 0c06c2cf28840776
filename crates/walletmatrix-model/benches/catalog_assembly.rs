use criterion::{black_box, criterion_group, criterion_main, Criterion};
use walletmatrix_model::{
    assemble_views, normalize_feature_key, Catalog, Feature, FeatureId, FeatureKey, FeatureValue,
    ValueTag, Wallet, WalletFeature, WalletId, WalletType,
};

const WALLETS: u64 = 30;
const FEATURES: u64 = 20;

fn populated_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for idx in 1..=FEATURES {
        let feature = Feature::new(
            FeatureId::new(idx),
            FeatureKey::parse(&format!("feature{idx}")).expect("key"),
            format!("Feature {idx}"),
            format!("Benchmark feature {idx}"),
            WalletType::Lightning,
            None,
            idx as i64,
            None,
        );
        catalog.insert_feature(feature).expect("feature");
    }
    for idx in 1..=WALLETS {
        let wallet = Wallet::new(
            WalletId::new(idx),
            format!("Wallet {idx}"),
            format!("https://example.org/w{idx}"),
            format!("Benchmark wallet {idx}"),
            WalletType::Lightning,
            None,
            None,
            idx as i64,
        );
        catalog.insert_wallet(wallet).expect("wallet");
        for feature in 1..=FEATURES {
            let association = WalletFeature::new(
                WalletId::new(idx),
                FeatureId::new(feature),
                FeatureValue::tagged(ValueTag::Yes).expect("value"),
                None,
                None,
            );
            catalog.upsert_association(association).expect("association");
        }
    }
    catalog
}

fn bench_normalize_feature_key(c: &mut Criterion) {
    c.bench_function("normalize_feature_key", |b| {
        b.iter(|| normalize_feature_key(black_box("Lightning Address (LNURL) Support")))
    });
}

fn bench_assemble_full_matrix(c: &mut Criterion) {
    let catalog = populated_catalog();
    c.bench_function("assemble_full_matrix", |b| {
        b.iter(|| assemble_views(black_box(&catalog), None, None))
    });
}

fn bench_assemble_single_wallet(c: &mut Criterion) {
    let catalog = populated_catalog();
    c.bench_function("assemble_single_wallet", |b| {
        b.iter(|| assemble_views(black_box(&catalog), Some(WalletId::new(7)), None))
    });
}

criterion_group!(
    benches,
    bench_normalize_feature_key,
    bench_assemble_full_matrix,
    bench_assemble_single_wallet
);
criterion_main!(benches);
