// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use walletmatrix_model::{FeatureCategory, UpsertOutcome, ValueTag, WalletType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletDto {
    pub id: u64,
    pub name: String,
    pub website: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureDto {
    pub id: u64,
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FeatureCategory>,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureEntryDto {
    pub feature_id: u64,
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

/// The comparison-matrix row: wallet fields flattened next to the feature
/// entries. Spelled out field by field so the wire shape stays explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletWithFeaturesDto {
    pub id: u64,
    pub name: String,
    pub website: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    pub order: i64,
    pub features: Vec<FeatureEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssociationDto {
    pub wallet_id: u64,
    pub feature_id: u64,
    pub value: ValueTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetAssociationDto {
    pub association: AssociationDto,
    pub outcome: UpsertOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletDeletedDto {
    pub deleted: WalletDto,
    pub dropped_associations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureDeletedDto {
    pub deleted: FeatureDto,
    pub dropped_associations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionDto {
    pub email: String,
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionRemovedDto {
    pub email: String,
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalletBody {
    pub name: String,
    pub website: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureBody {
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default)]
    pub category: Option<FeatureCategory>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssociationBody {
    pub value: ValueTag,
    #[serde(default)]
    pub custom_text: Option<String>,
    #[serde(default)]
    pub reference_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionBody {
    pub email: String,
}
