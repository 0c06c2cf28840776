use walletmatrix_model::{
    Catalog, Feature, FeatureCategory, FeatureId, FeatureKey, FeatureValue, Wallet, WalletFeature,
    WalletId, WalletType,
};

/// Built-in dataset served when no source documents exist: three Lightning
/// wallets sharing four features, with plain tags, custom text, reference
/// links and notes all represented.
#[must_use]
pub fn seed_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for feature in seed_features() {
        catalog
            .insert_feature(feature)
            .expect("seed feature ids are unique");
    }
    for wallet in seed_wallets() {
        catalog
            .insert_wallet(wallet)
            .expect("seed wallet ids are unique");
    }
    for association in seed_associations() {
        catalog
            .upsert_association(association)
            .expect("seed associations reference seed ids");
    }
    catalog
}

fn key(raw: &str) -> FeatureKey {
    FeatureKey::parse(raw).expect("seed feature key")
}

fn tagged(tag: walletmatrix_model::ValueTag) -> FeatureValue {
    FeatureValue::tagged(tag).expect("seed value tag")
}

fn custom(text: &str) -> FeatureValue {
    FeatureValue::custom(text).expect("seed custom value")
}

fn seed_features() -> Vec<Feature> {
    vec![
        Feature::new(
            FeatureId::new(1),
            key("onChain"),
            "On-Chain".to_string(),
            "Sending and receiving on-chain bitcoin".to_string(),
            WalletType::Lightning,
            Some(FeatureCategory::Payments),
            1,
            None,
        ),
        Feature::new(
            FeatureId::new(2),
            key("invoice"),
            "Invoice".to_string(),
            "Paying and generating BOLT11 invoices".to_string(),
            WalletType::Lightning,
            Some(FeatureCategory::Payments),
            2,
            None,
        ),
        Feature::new(
            FeatureId::new(3),
            key("lnurl"),
            "LNURL".to_string(),
            "LNURL-pay and LNURL-withdraw support".to_string(),
            WalletType::Lightning,
            Some(FeatureCategory::Advanced),
            3,
            None,
        ),
        Feature::new(
            FeatureId::new(4),
            key("implementation"),
            "Implementation".to_string(),
            "Underlying Lightning node implementation".to_string(),
            WalletType::Lightning,
            Some(FeatureCategory::Advanced),
            4,
            None,
        ),
    ]
}

fn seed_wallets() -> Vec<Wallet> {
    vec![
        Wallet::new(
            WalletId::new(1),
            "Phoenix".to_string(),
            "https://phoenix.acinq.co".to_string(),
            "Self-custodial Lightning wallet with automatic channel management".to_string(),
            WalletType::Lightning,
            Some("phoenix".to_string()),
            Some("Android, iOS".to_string()),
            1,
        ),
        Wallet::new(
            WalletId::new(2),
            "Breez".to_string(),
            "https://breez.technology".to_string(),
            "Non-custodial Lightning client with built-in point of sale".to_string(),
            WalletType::Lightning,
            Some("breez".to_string()),
            Some("Android, iOS".to_string()),
            2,
        ),
        Wallet::new(
            WalletId::new(3),
            "Zeus".to_string(),
            "https://zeusln.com".to_string(),
            "Companion app for operators running their own Lightning node".to_string(),
            WalletType::Lightning,
            Some("zeus".to_string()),
            Some("Android, iOS".to_string()),
            3,
        ),
    ]
}

fn seed_associations() -> Vec<WalletFeature> {
    use walletmatrix_model::ValueTag::{Eclair, SendOnly, Yes};
    vec![
        // Phoenix
        WalletFeature::new(
            WalletId::new(1),
            FeatureId::new(1),
            custom("Automatic swap on receive"),
            None,
            None,
        ),
        WalletFeature::new(WalletId::new(1), FeatureId::new(2), tagged(Yes), None, None),
        WalletFeature::new(
            WalletId::new(1),
            FeatureId::new(3),
            tagged(SendOnly),
            None,
            None,
        ),
        WalletFeature::new(
            WalletId::new(1),
            FeatureId::new(4),
            tagged(Eclair),
            None,
            None,
        ),
        // Breez
        WalletFeature::new(
            WalletId::new(2),
            FeatureId::new(1),
            tagged(Yes),
            Some("https://breez.technology/docs".to_string()),
            None,
        ),
        WalletFeature::new(WalletId::new(2), FeatureId::new(2), tagged(Yes), None, None),
        WalletFeature::new(WalletId::new(2), FeatureId::new(3), tagged(Yes), None, None),
        WalletFeature::new(
            WalletId::new(2),
            FeatureId::new(4),
            custom("Greenlight (hosted CLN)"),
            None,
            None,
        ),
        // Zeus
        WalletFeature::new(WalletId::new(3), FeatureId::new(1), tagged(Yes), None, None),
        WalletFeature::new(
            WalletId::new(3),
            FeatureId::new(2),
            tagged(Yes),
            None,
            Some("Requires a reachable node".to_string()),
        ),
        WalletFeature::new(WalletId::new(3), FeatureId::new(3), tagged(Yes), None, None),
        WalletFeature::new(
            WalletId::new(3),
            FeatureId::new(4),
            custom("LND, CLN or Eclair over remote connection"),
            None,
            None,
        ),
    ]
}
