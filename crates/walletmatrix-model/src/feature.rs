// SPDX-License-Identifier: Apache-2.0

use crate::ids::{FeatureId, ParseError};
use crate::wallet::{WalletType, DESCRIPTION_MAX_LEN, NAME_MAX_LEN, WEBSITE_MAX_LEN};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const KEY_MAX_LEN: usize = 64;

pub fn parse_feature_key(input: &str) -> Result<FeatureKey, ParseError> {
    FeatureKey::parse(input)
}

/// Lowercases and collapses every run of non-alphanumeric characters to a
/// single `_`, so `"On-Chain"`, `"on chain"` and `"onChain"`-derived display
/// names all land on the same alias key.
#[must_use]
pub fn normalize_feature_key(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct FeatureKey(String);

impl FeatureKey {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("feature key"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("feature key"));
        }
        if input.len() > KEY_MAX_LEN {
            return Err(ParseError::TooLong("feature key", KEY_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_feature_key(&self.0)
    }
}

impl Display for FeatureKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FeatureCategory {
    Basics,
    Payments,
    Channels,
    Privacy,
    Security,
    Advanced,
}

impl FeatureCategory {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "basics" => Ok(Self::Basics),
            "payments" => Ok(Self::Payments),
            "channels" => Ok(Self::Channels),
            "privacy" => Ok(Self::Privacy),
            "security" => Ok(Self::Security),
            "advanced" => Ok(Self::Advanced),
            _ => Err(ParseError::InvalidFormat(
                "feature category must be one of 'basics', 'payments', 'channels', 'privacy', 'security', 'advanced'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basics => "basics",
            Self::Payments => "payments",
            Self::Channels => "channels",
            Self::Privacy => "privacy",
            Self::Security => "security",
            Self::Advanced => "advanced",
        }
    }
}

impl Display for FeatureCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Feature {
    pub id: FeatureId,
    pub key: FeatureKey,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FeatureCategory>,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

impl Feature {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: FeatureId,
        key: FeatureKey,
        name: String,
        description: String,
        wallet_type: WalletType,
        category: Option<FeatureCategory>,
        order: i64,
        info_link: Option<String>,
    ) -> Self {
        Self {
            id,
            key,
            name,
            description,
            wallet_type,
            category,
            order,
            info_link,
        }
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.name.is_empty() {
            return Err(ParseError::Empty("feature name"));
        }
        if self.name.trim() != self.name {
            return Err(ParseError::Trimmed("feature name"));
        }
        if self.name.len() > NAME_MAX_LEN {
            return Err(ParseError::TooLong("feature name", NAME_MAX_LEN));
        }
        if self.description.len() > DESCRIPTION_MAX_LEN {
            return Err(ParseError::TooLong(
                "feature description",
                DESCRIPTION_MAX_LEN,
            ));
        }
        if let Some(link) = &self.info_link {
            if link.len() > WEBSITE_MAX_LEN {
                return Err(ParseError::TooLong("feature info link", WEBSITE_MAX_LEN));
            }
            if !(link.starts_with("https://") || link.starts_with("http://")) {
                return Err(ParseError::InvalidFormat(
                    "feature info link must be an http(s) URL",
                ));
            }
        }
        Ok(())
    }
}
