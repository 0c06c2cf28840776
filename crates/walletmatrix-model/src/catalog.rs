// SPDX-License-Identifier: Apache-2.0

use crate::association::WalletFeature;
use crate::feature::Feature;
use crate::ids::{FeatureId, WalletId};
use crate::wallet::Wallet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    DuplicateWallet(WalletId),
    DuplicateFeature(FeatureId),
    UnknownWallet(WalletId),
    UnknownFeature(FeatureId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateWallet(id) => write!(f, "wallet {id} already exists"),
            Self::DuplicateFeature(id) => write!(f, "feature {id} already exists"),
            Self::UnknownWallet(id) => write!(f, "wallet {id} does not exist"),
            Self::UnknownFeature(id) => write!(f, "feature {id} does not exist"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// In-memory wallet/feature/association state.
///
/// Wallets and features are keyed by id; associations keep their insertion
/// order, and an upsert for an existing (wallet, feature) pair replaces the
/// entry in place without moving it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    wallets: BTreeMap<WalletId, Wallet>,
    features: BTreeMap<FeatureId, Feature>,
    associations: Vec<WalletFeature>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_wallet(&mut self, wallet: Wallet) -> Result<(), CatalogError> {
        if self.wallets.contains_key(&wallet.id) {
            return Err(CatalogError::DuplicateWallet(wallet.id));
        }
        self.wallets.insert(wallet.id, wallet);
        Ok(())
    }

    pub fn replace_wallet(&mut self, wallet: Wallet) -> Result<Wallet, CatalogError> {
        let id = wallet.id;
        match self.wallets.get_mut(&id) {
            Some(slot) => Ok(std::mem::replace(slot, wallet)),
            None => Err(CatalogError::UnknownWallet(id)),
        }
    }

    /// Removes a wallet and its associations. Returns the wallet together
    /// with the number of associations dropped in the cascade.
    pub fn remove_wallet(&mut self, id: WalletId) -> Result<(Wallet, usize), CatalogError> {
        let wallet = self
            .wallets
            .remove(&id)
            .ok_or(CatalogError::UnknownWallet(id))?;
        let before = self.associations.len();
        self.associations.retain(|a| a.wallet_id != id);
        Ok((wallet, before - self.associations.len()))
    }

    pub fn insert_feature(&mut self, feature: Feature) -> Result<(), CatalogError> {
        if self.features.contains_key(&feature.id) {
            return Err(CatalogError::DuplicateFeature(feature.id));
        }
        self.features.insert(feature.id, feature);
        Ok(())
    }

    pub fn replace_feature(&mut self, feature: Feature) -> Result<Feature, CatalogError> {
        let id = feature.id;
        match self.features.get_mut(&id) {
            Some(slot) => Ok(std::mem::replace(slot, feature)),
            None => Err(CatalogError::UnknownFeature(id)),
        }
    }

    /// Removes a feature and its associations. Returns the feature together
    /// with the number of associations dropped in the cascade.
    pub fn remove_feature(&mut self, id: FeatureId) -> Result<(Feature, usize), CatalogError> {
        let feature = self
            .features
            .remove(&id)
            .ok_or(CatalogError::UnknownFeature(id))?;
        let before = self.associations.len();
        self.associations.retain(|a| a.feature_id != id);
        Ok((feature, before - self.associations.len()))
    }

    /// Upsert keyed by (wallet, feature): a second write to the same pair
    /// replaces the stored value instead of adding a row.
    pub fn upsert_association(
        &mut self,
        association: WalletFeature,
    ) -> Result<UpsertOutcome, CatalogError> {
        if !self.wallets.contains_key(&association.wallet_id) {
            return Err(CatalogError::UnknownWallet(association.wallet_id));
        }
        if !self.features.contains_key(&association.feature_id) {
            return Err(CatalogError::UnknownFeature(association.feature_id));
        }
        let existing = self.associations.iter_mut().find(|a| {
            a.wallet_id == association.wallet_id && a.feature_id == association.feature_id
        });
        match existing {
            Some(slot) => {
                *slot = association;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.associations.push(association);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    #[must_use]
    pub fn wallet(&self, id: WalletId) -> Option<&Wallet> {
        self.wallets.get(&id)
    }

    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    pub fn wallets(&self) -> impl Iterator<Item = &Wallet> {
        self.wallets.values()
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    #[must_use]
    pub fn associations(&self) -> &[WalletFeature] {
        &self.associations
    }

    pub fn associations_for(&self, wallet_id: WalletId) -> impl Iterator<Item = &WalletFeature> {
        self.associations
            .iter()
            .filter(move |a| a.wallet_id == wallet_id)
    }

    #[must_use]
    pub fn association(&self, wallet_id: WalletId, feature_id: FeatureId) -> Option<&WalletFeature> {
        self.associations
            .iter()
            .find(|a| a.wallet_id == wallet_id && a.feature_id == feature_id)
    }

    #[must_use]
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn association_count(&self) -> usize {
        self.associations.len()
    }

    /// True when neither wallets nor features are present; the trigger for
    /// falling back to the built-in seed dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty() && self.features.is_empty()
    }

    #[must_use]
    pub fn next_wallet_id(&self) -> WalletId {
        WalletId::new(self.wallets.keys().last().map_or(0, |id| id.get()) + 1)
    }

    #[must_use]
    pub fn next_feature_id(&self) -> FeatureId {
        FeatureId::new(self.features.keys().last().map_or(0, |id| id.get()) + 1)
    }
}
