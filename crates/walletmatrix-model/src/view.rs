use crate::catalog::Catalog;
use crate::feature::FeatureCategory;
use crate::ids::{FeatureId, WalletId};
use crate::value::ValueTag;
use crate::wallet::{Wallet, WalletType};
use serde::{Deserialize, Serialize};

/// One flattened row of the comparison view: the association's value joined
/// with the owning feature's display fields. The feature record stays the
/// source of truth for name/description/category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct WalletFeatureEntry {
    pub feature_id: FeatureId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FeatureCategory>,
    pub value: ValueTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Read-only derived view; recomputed on every assemble, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct WalletWithFeatures {
    pub wallet: Wallet,
    pub features: Vec<WalletFeatureEntry>,
}

/// Joins wallets, features and associations into the denormalized view.
///
/// Wallets come back sorted by `order` with name as tie-break. Feature
/// entries keep association insertion order; a pair with no association is
/// simply absent from the list. A wallet with no associations yields an
/// empty `features` vec, not an error.
#[must_use]
pub fn assemble_views(
    catalog: &Catalog,
    wallet_id: Option<WalletId>,
    type_filter: Option<WalletType>,
) -> Vec<WalletWithFeatures> {
    let mut wallets: Vec<&Wallet> = catalog
        .wallets()
        .filter(|w| wallet_id.map_or(true, |id| w.id == id))
        .filter(|w| type_filter.map_or(true, |t| w.wallet_type == t))
        .collect();
    wallets.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
    wallets
        .into_iter()
        .map(|wallet| WalletWithFeatures {
            wallet: wallet.clone(),
            features: feature_entries(catalog, wallet.id),
        })
        .collect()
}

fn feature_entries(catalog: &Catalog, wallet_id: WalletId) -> Vec<WalletFeatureEntry> {
    catalog
        .associations_for(wallet_id)
        .filter_map(|assoc| {
            let feature = catalog.feature(assoc.feature_id)?;
            Some(WalletFeatureEntry {
                feature_id: feature.id,
                name: feature.name.clone(),
                description: feature.description.clone(),
                category: feature.category,
                value: assoc.value.tag(),
                custom_text: assoc.value.custom_text().map(str::to_string),
                reference_link: assoc.reference_link.clone(),
                notes: assoc.notes.clone(),
            })
        })
        .collect()
}
