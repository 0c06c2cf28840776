// SPDX-License-Identifier: Apache-2.0

use tokio::sync::RwLock;
use walletmatrix_model::{
    assemble_views, parse_feature_key, Catalog, Feature, FeatureCategory, FeatureId, FeatureValue,
    UpsertOutcome, ValueTag, Wallet, WalletFeature, WalletId, WalletType, WalletWithFeatures,
};

use crate::{StoreError, StoreErrorCode};

/// Wallet fields as submitted by a caller. The store mints the id on create
/// and revalidates on every write.
#[derive(Debug, Clone)]
pub struct WalletDraft {
    pub name: String,
    pub website: String,
    pub description: String,
    pub wallet_type: WalletType,
    pub logo: Option<String>,
    pub availability: Option<String>,
    pub order: i64,
}

#[derive(Debug, Clone)]
pub struct FeatureDraft {
    pub key: String,
    pub name: String,
    pub description: String,
    pub wallet_type: WalletType,
    pub category: Option<FeatureCategory>,
    pub order: i64,
    pub info_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssociationDraft {
    pub value: ValueTag,
    pub custom_text: Option<String>,
    pub reference_link: Option<String>,
    pub notes: Option<String>,
}

/// In-memory catalog shared across request handlers.
///
/// Reads clone values out of the read half of the lock; the administrative
/// writes (create/update/delete/set) serialize on the write half, which also
/// makes id minting atomic with the insert.
pub struct CatalogStore {
    catalog: RwLock<Catalog>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    pub async fn counts(&self) -> (usize, usize, usize) {
        let catalog = self.catalog.read().await;
        (
            catalog.wallet_count(),
            catalog.feature_count(),
            catalog.association_count(),
        )
    }

    /// Wallets matching the optional type filter, ascending `order` with
    /// name as tie-break.
    pub async fn list_wallets(&self, type_filter: Option<WalletType>) -> Vec<Wallet> {
        let catalog = self.catalog.read().await;
        let mut wallets: Vec<Wallet> = catalog
            .wallets()
            .filter(|w| type_filter.map_or(true, |t| w.wallet_type == t))
            .cloned()
            .collect();
        wallets.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        wallets
    }

    pub async fn wallet(&self, id: WalletId) -> Result<Wallet, StoreError> {
        let catalog = self.catalog.read().await;
        catalog.wallet(id).cloned().ok_or_else(|| missing_wallet(id))
    }

    pub async fn create_wallet(&self, draft: WalletDraft) -> Result<Wallet, StoreError> {
        let mut catalog = self.catalog.write().await;
        let wallet = build_wallet(catalog.next_wallet_id(), draft)?;
        catalog.insert_wallet(wallet.clone())?;
        Ok(wallet)
    }

    pub async fn update_wallet(
        &self,
        id: WalletId,
        draft: WalletDraft,
    ) -> Result<Wallet, StoreError> {
        let wallet = build_wallet(id, draft)?;
        let mut catalog = self.catalog.write().await;
        catalog.replace_wallet(wallet.clone())?;
        Ok(wallet)
    }

    /// Removes the wallet and, by the documented cascade policy, every
    /// association that referenced it. Returns the dropped association count
    /// so the caller can log it.
    pub async fn delete_wallet(&self, id: WalletId) -> Result<(Wallet, usize), StoreError> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.remove_wallet(id)?)
    }

    /// Features matching the optional type filter, ascending `order` with
    /// name as tie-break.
    pub async fn list_features(&self, type_filter: Option<WalletType>) -> Vec<Feature> {
        let catalog = self.catalog.read().await;
        let mut features: Vec<Feature> = catalog
            .features()
            .filter(|f| type_filter.map_or(true, |t| f.wallet_type == t))
            .cloned()
            .collect();
        features.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        features
    }

    pub async fn create_feature(&self, draft: FeatureDraft) -> Result<Feature, StoreError> {
        let mut catalog = self.catalog.write().await;
        let feature = build_feature(catalog.next_feature_id(), draft)?;
        catalog.insert_feature(feature.clone())?;
        Ok(feature)
    }

    pub async fn update_feature(
        &self,
        id: FeatureId,
        draft: FeatureDraft,
    ) -> Result<Feature, StoreError> {
        let feature = build_feature(id, draft)?;
        let mut catalog = self.catalog.write().await;
        catalog.replace_feature(feature.clone())?;
        Ok(feature)
    }

    /// Removes the feature and cascades to its associations; returns the
    /// dropped association count.
    pub async fn delete_feature(&self, id: FeatureId) -> Result<(Feature, usize), StoreError> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.remove_feature(id)?)
    }

    /// Upsert keyed by (wallet, feature): a second set for the same pair
    /// replaces the stored value instead of adding a duplicate.
    pub async fn set_association(
        &self,
        wallet_id: WalletId,
        feature_id: FeatureId,
        draft: AssociationDraft,
    ) -> Result<(WalletFeature, UpsertOutcome), StoreError> {
        let value = FeatureValue::new(draft.value, draft.custom_text.as_deref())?;
        let association = WalletFeature::new(
            wallet_id,
            feature_id,
            value,
            draft.reference_link,
            draft.notes,
        );
        association.validate()?;
        let mut catalog = self.catalog.write().await;
        let outcome = catalog.upsert_association(association.clone())?;
        Ok((association, outcome))
    }

    /// The denormalized comparison matrix for every wallet passing the
    /// optional type filter.
    pub async fn views(&self, type_filter: Option<WalletType>) -> Vec<WalletWithFeatures> {
        let catalog = self.catalog.read().await;
        assemble_views(&catalog, None, type_filter)
    }

    pub async fn wallet_view(&self, id: WalletId) -> Result<WalletWithFeatures, StoreError> {
        let catalog = self.catalog.read().await;
        assemble_views(&catalog, Some(id), None)
            .into_iter()
            .next()
            .ok_or_else(|| missing_wallet(id))
    }

    /// Side-by-side views in the order the ids were requested. Any unknown
    /// id fails the whole comparison.
    pub async fn compare(&self, ids: &[WalletId]) -> Result<Vec<WalletWithFeatures>, StoreError> {
        let catalog = self.catalog.read().await;
        ids.iter()
            .map(|id| {
                assemble_views(&catalog, Some(*id), None)
                    .into_iter()
                    .next()
                    .ok_or_else(|| missing_wallet(*id))
            })
            .collect()
    }
}

fn missing_wallet(id: WalletId) -> StoreError {
    StoreError::new(
        StoreErrorCode::NotFound,
        format!("wallet {id} does not exist"),
    )
}

fn build_wallet(id: WalletId, draft: WalletDraft) -> Result<Wallet, StoreError> {
    let wallet = Wallet::new(
        id,
        draft.name,
        draft.website,
        draft.description,
        draft.wallet_type,
        draft.logo,
        draft.availability,
        draft.order,
    );
    wallet.validate()?;
    Ok(wallet)
}

fn build_feature(id: FeatureId, draft: FeatureDraft) -> Result<Feature, StoreError> {
    let key = parse_feature_key(&draft.key)?;
    let feature = Feature::new(
        id,
        key,
        draft.name,
        draft.description,
        draft.wallet_type,
        draft.category,
        draft.order,
        draft.info_link,
    );
    feature.validate()?;
    Ok(feature)
}
