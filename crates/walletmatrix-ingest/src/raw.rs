use serde::Deserialize;
use std::collections::BTreeMap;
use walletmatrix_model::{FeatureCategory, ValueTag, WalletType};

/// One entry of a feature-definitions document (a JSON array of these).
/// `id` is the author-chosen external key later resolved to a numeric id.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawFeatureDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
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

/// One wallet document. The `features` map values stay raw JSON here; they
/// are normalized entry by entry so one bad value cannot sink the document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawWalletDoc {
    pub name: String,
    pub website: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub features: BTreeMap<String, serde_json::Value>,
}

/// The two source shapes a feature value arrives in: a bare tag string, or
/// an object carrying the tag plus custom text, link and notes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFeatureValue {
    Tag(ValueTag),
    Detailed(RawDetailedValue),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawDetailedValue {
    pub value: ValueTag,
    #[serde(default)]
    pub custom_text: Option<String>,
    #[serde(default)]
    pub reference_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
