use walletmatrix_model::{
    assemble_views, Catalog, Feature, FeatureCategory, FeatureId, FeatureKey, FeatureValue,
    ValueTag, Wallet, WalletFeature, WalletId, WalletType,
};

fn wallet(id: u64, name: &str, wallet_type: WalletType, order: i64) -> Wallet {
    Wallet::new(
        WalletId::new(id),
        name.to_string(),
        "https://example.org".to_string(),
        format!("{name} description"),
        wallet_type,
        None,
        None,
        order,
    )
}

fn feature(id: u64, key: &str, name: &str) -> Feature {
    Feature::new(
        FeatureId::new(id),
        FeatureKey::parse(key).expect("feature key"),
        name.to_string(),
        format!("{name} description"),
        WalletType::Lightning,
        Some(FeatureCategory::Basics),
        0,
        None,
    )
}

fn seeded() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .insert_wallet(wallet(1, "Breez", WalletType::Lightning, 2))
        .expect("wallet");
    catalog
        .insert_wallet(wallet(2, "Aqua", WalletType::Lightning, 1))
        .expect("wallet");
    catalog
        .insert_wallet(wallet(3, "Zeus", WalletType::Lightning, 1))
        .expect("wallet");
    catalog
        .insert_feature(feature(1, "onChain", "On-Chain"))
        .expect("feature");
    catalog
        .insert_feature(feature(2, "invoice", "Invoice"))
        .expect("feature");
    catalog
}

#[test]
fn wallets_come_back_sorted_by_order_then_name() {
    let views = assemble_views(&seeded(), None, None);
    let names: Vec<&str> = views.iter().map(|v| v.wallet.name.as_str()).collect();
    assert_eq!(names, vec!["Aqua", "Zeus", "Breez"]);
}

#[test]
fn wallet_without_associations_assembles_with_empty_features() {
    let views = assemble_views(&seeded(), Some(WalletId::new(1)), None);
    assert_eq!(views.len(), 1);
    assert!(views[0].features.is_empty());
}

#[test]
fn type_filter_with_no_matches_yields_empty_list() {
    let views = assemble_views(&seeded(), None, Some(WalletType::Hardware));
    assert!(views.is_empty());
}

#[test]
fn entries_join_feature_display_fields_with_association_values() {
    let mut catalog = seeded();
    catalog
        .upsert_association(WalletFeature::new(
            WalletId::new(1),
            FeatureId::new(2),
            FeatureValue::custom("Receive Only").expect("value"),
            Some("https://docs.example.org/invoice".to_string()),
            None,
        ))
        .expect("association");

    let views = assemble_views(&catalog, Some(WalletId::new(1)), None);
    assert_eq!(views.len(), 1);
    let entry = &views[0].features[0];
    assert_eq!(entry.feature_id, FeatureId::new(2));
    assert_eq!(entry.name, "Invoice");
    assert_eq!(entry.description, "Invoice description");
    assert_eq!(entry.category, Some(FeatureCategory::Basics));
    assert_eq!(entry.value, ValueTag::Custom);
    assert_eq!(entry.custom_text.as_deref(), Some("Receive Only"));
    assert_eq!(
        entry.reference_link.as_deref(),
        Some("https://docs.example.org/invoice")
    );
}

#[test]
fn entries_keep_association_insertion_order() {
    let mut catalog = seeded();
    for feature_id in [2, 1] {
        catalog
            .upsert_association(WalletFeature::new(
                WalletId::new(1),
                FeatureId::new(feature_id),
                FeatureValue::tagged(ValueTag::Yes).expect("value"),
                None,
                None,
            ))
            .expect("association");
    }

    let views = assemble_views(&catalog, Some(WalletId::new(1)), None);
    let ids: Vec<u64> = views[0].features.iter().map(|e| e.feature_id.get()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn unknown_wallet_selection_yields_empty_list() {
    let views = assemble_views(&seeded(), Some(WalletId::new(99)), None);
    assert!(views.is_empty());
}
