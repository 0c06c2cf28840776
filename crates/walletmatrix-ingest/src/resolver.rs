// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use walletmatrix_model::{normalize_feature_key, Feature, FeatureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Found(FeatureId),
    NotFound,
}

/// Two-stage lookup table built once per load: exact match on the canonical
/// author key first, then the normalized display-name alias for older
/// records that referenced features by human-readable name.
#[derive(Debug, Clone, Default)]
pub struct FeatureResolver {
    canonical: BTreeMap<String, FeatureId>,
    aliases: BTreeMap<String, FeatureId>,
}

impl FeatureResolver {
    /// Builds the table in feature registration order. When two features
    /// normalize to the same alias the first registration keeps it; each
    /// later claim is returned as a collision message.
    pub fn build<'a, I>(features: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        let mut resolver = Self::default();
        let mut collisions = Vec::new();
        for feature in features {
            resolver
                .canonical
                .entry(feature.key.as_str().to_string())
                .or_insert(feature.id);
            let alias = normalize_feature_key(&feature.name);
            if alias.is_empty() {
                continue;
            }
            match resolver.aliases.get(&alias) {
                Some(existing) if *existing != feature.id => {
                    collisions.push(format!(
                        "alias '{alias}' wanted by feature {} is already claimed by feature {existing}; first registration wins",
                        feature.id
                    ));
                }
                Some(_) => {}
                None => {
                    resolver.aliases.insert(alias, feature.id);
                }
            }
        }
        (resolver, collisions)
    }

    /// Canonical key match first, then alias lookup on the normalized form
    /// of the incoming key (external keys arrive with arbitrary case and
    /// spacing).
    #[must_use]
    pub fn resolve(&self, external: &str) -> Resolution {
        if let Some(id) = self.canonical.get(external) {
            return Resolution::Found(*id);
        }
        let normalized = normalize_feature_key(external);
        if let Some(id) = self.aliases.get(&normalized) {
            return Resolution::Found(*id);
        }
        Resolution::NotFound
    }

    #[must_use]
    pub fn known_keys(&self) -> Vec<&str> {
        self.canonical.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn canonical_len(&self) -> usize {
        self.canonical.len()
    }

    #[must_use]
    pub fn alias_len(&self) -> usize {
        self.aliases.len()
    }
}
