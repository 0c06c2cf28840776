use walletmatrix_model::{
    Catalog, CatalogError, Feature, FeatureId, FeatureKey, FeatureValue, UpsertOutcome, ValueTag,
    Wallet, WalletFeature, WalletId, WalletType,
};

fn wallet(id: u64, name: &str) -> Wallet {
    Wallet::new(
        WalletId::new(id),
        name.to_string(),
        "https://example.org".to_string(),
        String::new(),
        WalletType::Lightning,
        None,
        None,
        0,
    )
}

fn feature(id: u64, key: &str, name: &str) -> Feature {
    Feature::new(
        FeatureId::new(id),
        FeatureKey::parse(key).expect("feature key"),
        name.to_string(),
        String::new(),
        WalletType::Lightning,
        None,
        0,
        None,
    )
}

fn association(wallet_id: u64, feature_id: u64, tag: ValueTag) -> WalletFeature {
    WalletFeature::new(
        WalletId::new(wallet_id),
        FeatureId::new(feature_id),
        FeatureValue::tagged(tag).expect("value"),
        None,
        None,
    )
}

fn seeded() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert_wallet(wallet(1, "Alpha")).expect("wallet");
    catalog.insert_wallet(wallet(2, "Beta")).expect("wallet");
    catalog
        .insert_feature(feature(1, "onChain", "On-Chain"))
        .expect("feature");
    catalog
        .insert_feature(feature(2, "invoice", "Invoice"))
        .expect("feature");
    catalog
}

#[test]
fn association_upsert_replaces_in_place() {
    let mut catalog = seeded();
    let first = catalog
        .upsert_association(association(1, 1, ValueTag::Yes))
        .expect("insert");
    assert_eq!(first, UpsertOutcome::Inserted);

    let second = catalog
        .upsert_association(association(1, 1, ValueTag::Partial))
        .expect("update");
    assert_eq!(second, UpsertOutcome::Updated);

    assert_eq!(catalog.association_count(), 1);
    let stored = catalog
        .association(WalletId::new(1), FeatureId::new(1))
        .expect("association");
    assert_eq!(stored.value.tag(), ValueTag::Partial);
}

#[test]
fn upsert_preserves_insertion_position() {
    let mut catalog = seeded();
    catalog
        .upsert_association(association(1, 2, ValueTag::Yes))
        .expect("insert");
    catalog
        .upsert_association(association(1, 1, ValueTag::Yes))
        .expect("insert");
    catalog
        .upsert_association(association(1, 2, ValueTag::No))
        .expect("update");

    let order: Vec<u64> = catalog
        .associations_for(WalletId::new(1))
        .map(|a| a.feature_id.get())
        .collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
fn upsert_rejects_unknown_endpoints() {
    let mut catalog = seeded();
    assert_eq!(
        catalog.upsert_association(association(99, 1, ValueTag::Yes)),
        Err(CatalogError::UnknownWallet(WalletId::new(99)))
    );
    assert_eq!(
        catalog.upsert_association(association(1, 99, ValueTag::Yes)),
        Err(CatalogError::UnknownFeature(FeatureId::new(99)))
    );
}

#[test]
fn wallet_removal_cascades_to_associations() {
    let mut catalog = seeded();
    catalog
        .upsert_association(association(1, 1, ValueTag::Yes))
        .expect("insert");
    catalog
        .upsert_association(association(1, 2, ValueTag::No))
        .expect("insert");
    catalog
        .upsert_association(association(2, 1, ValueTag::Yes))
        .expect("insert");

    let (removed, dropped) = catalog.remove_wallet(WalletId::new(1)).expect("remove");
    assert_eq!(removed.name, "Alpha");
    assert_eq!(dropped, 2);
    assert_eq!(catalog.association_count(), 1);
    assert!(catalog
        .association(WalletId::new(2), FeatureId::new(1))
        .is_some());
}

#[test]
fn feature_removal_cascades_to_associations() {
    let mut catalog = seeded();
    catalog
        .upsert_association(association(1, 1, ValueTag::Yes))
        .expect("insert");
    catalog
        .upsert_association(association(2, 1, ValueTag::Yes))
        .expect("insert");
    catalog
        .upsert_association(association(2, 2, ValueTag::No))
        .expect("insert");

    let (removed, dropped) = catalog.remove_feature(FeatureId::new(1)).expect("remove");
    assert_eq!(removed.name, "On-Chain");
    assert_eq!(dropped, 2);
    assert_eq!(catalog.association_count(), 1);
}

#[test]
fn duplicate_inserts_are_rejected() {
    let mut catalog = seeded();
    assert_eq!(
        catalog.insert_wallet(wallet(1, "Again")),
        Err(CatalogError::DuplicateWallet(WalletId::new(1)))
    );
    assert_eq!(
        catalog.insert_feature(feature(2, "invoice", "Again")),
        Err(CatalogError::DuplicateFeature(FeatureId::new(2)))
    );
}

#[test]
fn replace_requires_existing_entity() {
    let mut catalog = seeded();
    let previous = catalog.replace_wallet(wallet(1, "Renamed")).expect("replace");
    assert_eq!(previous.name, "Alpha");
    assert_eq!(
        catalog.wallet(WalletId::new(1)).expect("wallet").name,
        "Renamed"
    );
    assert_eq!(
        catalog.replace_wallet(wallet(99, "Ghost")),
        Err(CatalogError::UnknownWallet(WalletId::new(99)))
    );
    assert_eq!(
        catalog.replace_feature(feature(99, "ghost", "Ghost")),
        Err(CatalogError::UnknownFeature(FeatureId::new(99)))
    );
}

#[test]
fn next_ids_advance_past_the_largest_key() {
    let catalog = seeded();
    assert_eq!(catalog.next_wallet_id(), WalletId::new(3));
    assert_eq!(catalog.next_feature_id(), FeatureId::new(3));

    let empty = Catalog::new();
    assert!(empty.is_empty());
    assert_eq!(empty.next_wallet_id(), WalletId::new(1));
    assert_eq!(empty.next_feature_id(), FeatureId::new(1));
}
