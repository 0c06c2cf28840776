use crate::raw::{RawFeatureDef, RawFeatureValue, RawWalletDoc};
use crate::report::IngestReport;
use crate::resolver::{FeatureResolver, Resolution};
use std::collections::{BTreeMap, BTreeSet};
use walletmatrix_model::{
    Catalog, Feature, FeatureKey, FeatureValue, Wallet, WalletFeature, WalletId,
};

/// Registers feature definitions in document order, assigning sequential
/// ids. Duplicate canonical keys keep the first definition; later ones are
/// recorded and dropped.
pub(crate) fn register_features(
    catalog: &mut Catalog,
    defs: Vec<RawFeatureDef>,
    report: &mut IngestReport,
) {
    let mut seen_keys: BTreeSet<String> = BTreeSet::new();
    for def in defs {
        let key = match FeatureKey::parse(&def.id) {
            Ok(key) => key,
            Err(e) => {
                report
                    .invalid_records
                    .push(format!("feature '{}': {e}", def.id));
                continue;
            }
        };
        if !seen_keys.insert(key.as_str().to_string()) {
            report.duplicate_keys.push(format!(
                "feature key '{key}' defined more than once; first definition wins"
            ));
            continue;
        }
        let feature = Feature::new(
            catalog.next_feature_id(),
            key,
            def.name,
            def.description,
            def.wallet_type,
            def.category,
            def.order,
            def.info_link,
        );
        if let Err(e) = feature.validate() {
            report
                .invalid_records
                .push(format!("feature '{}': {e}", feature.key));
            continue;
        }
        if let Err(e) = catalog.insert_feature(feature) {
            report.invalid_records.push(e.to_string());
        }
    }
}

/// Registers one wallet document and builds its associations. An invalid
/// wallet record drops the whole document; a bad feature entry drops only
/// that entry.
pub(crate) fn register_wallet(
    catalog: &mut Catalog,
    resolver: &FeatureResolver,
    doc: RawWalletDoc,
    report: &mut IngestReport,
) {
    let display_name = doc.name.clone();
    let wallet = Wallet::new(
        catalog.next_wallet_id(),
        doc.name,
        doc.website,
        doc.description,
        doc.wallet_type,
        doc.logo,
        doc.availability,
        doc.order,
    );
    if let Err(e) = wallet.validate() {
        report
            .invalid_records
            .push(format!("wallet '{display_name}': {e}"));
        return;
    }
    let wallet_id = wallet.id;
    if let Err(e) = catalog.insert_wallet(wallet) {
        report.invalid_records.push(e.to_string());
        return;
    }
    build_associations(
        catalog,
        resolver,
        wallet_id,
        &display_name,
        &doc.features,
        report,
    );
}

struct NormalizedValue {
    value: FeatureValue,
    reference_link: Option<String>,
    notes: Option<String>,
}

/// Resolves each feature map entry and upserts the association. Re-running
/// this for the same wallet replaces values instead of duplicating pairs;
/// that is the same upsert the interactive set operation uses.
pub(crate) fn build_associations(
    catalog: &mut Catalog,
    resolver: &FeatureResolver,
    wallet_id: WalletId,
    wallet_name: &str,
    features: &BTreeMap<String, serde_json::Value>,
    report: &mut IngestReport,
) {
    for (external, raw) in features {
        let feature_id = match resolver.resolve(external) {
            Resolution::Found(id) => id,
            Resolution::NotFound => {
                report.unresolved_keys.push(format!(
                    "wallet '{wallet_name}': unresolved feature key '{external}' (known: [{}])",
                    resolver.known_keys().join(", ")
                ));
                continue;
            }
        };
        let normalized = match normalize_value(raw) {
            Ok(normalized) => normalized,
            Err(reason) => {
                report.invalid_values.push(format!(
                    "wallet '{wallet_name}', feature '{external}': {reason}"
                ));
                continue;
            }
        };
        let association = WalletFeature::new(
            wallet_id,
            feature_id,
            normalized.value,
            normalized.reference_link,
            normalized.notes,
        );
        if let Err(e) = association.validate() {
            report.invalid_values.push(format!(
                "wallet '{wallet_name}', feature '{external}': {e}"
            ));
            continue;
        }
        if let Err(e) = catalog.upsert_association(association) {
            report.invalid_values.push(format!(
                "wallet '{wallet_name}', feature '{external}': {e}"
            ));
        }
    }
}

fn normalize_value(raw: &serde_json::Value) -> Result<NormalizedValue, String> {
    let shaped: RawFeatureValue =
        serde_json::from_value(raw.clone()).map_err(|e| format!("unrecognized value shape: {e}"))?;
    match shaped {
        RawFeatureValue::Tag(tag) => {
            let value = FeatureValue::tagged(tag).map_err(|e| e.to_string())?;
            Ok(NormalizedValue {
                value,
                reference_link: None,
                notes: None,
            })
        }
        RawFeatureValue::Detailed(detailed) => {
            let value = FeatureValue::new(detailed.value, detailed.custom_text.as_deref())
                .map_err(|e| e.to_string())?;
            Ok(NormalizedValue {
                value,
                reference_link: detailed.reference_link,
                notes: detailed.notes,
            })
        }
    }
}
