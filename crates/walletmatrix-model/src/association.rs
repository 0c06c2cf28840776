use crate::ids::{FeatureId, ParseError, WalletId};
use crate::value::FeatureValue;
use crate::wallet::WEBSITE_MAX_LEN;
use serde::{Deserialize, Serialize};

pub const NOTES_MAX_LEN: usize = 1024;

/// One (wallet, feature) relationship. The catalog holds at most one of
/// these per pair; writing to an existing pair replaces the value in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct WalletFeature {
    pub wallet_id: WalletId,
    pub feature_id: FeatureId,
    pub value: FeatureValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WalletFeature {
    #[must_use]
    pub fn new(
        wallet_id: WalletId,
        feature_id: FeatureId,
        value: FeatureValue,
        reference_link: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            wallet_id,
            feature_id,
            value,
            reference_link,
            notes,
        }
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        self.value.validate()?;
        if let Some(link) = &self.reference_link {
            if link.len() > WEBSITE_MAX_LEN {
                return Err(ParseError::TooLong("reference link", WEBSITE_MAX_LEN));
            }
            if !(link.starts_with("https://") || link.starts_with("http://")) {
                return Err(ParseError::InvalidFormat(
                    "reference link must be an http(s) URL",
                ));
            }
        }
        if let Some(notes) = &self.notes {
            if notes.len() > NOTES_MAX_LEN {
                return Err(ParseError::TooLong("notes", NOTES_MAX_LEN));
            }
        }
        Ok(())
    }
}
