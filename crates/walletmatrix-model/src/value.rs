// SPDX-License-Identifier: Apache-2.0

use crate::ids::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CUSTOM_TEXT_MAX_LEN: usize = 256;

/// Closed set of feature value tags. `Custom` is the only tag that carries
/// free text; everything else is a bare marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ValueTag {
    Yes,
    No,
    Partial,
    Custom,
    SendOnly,
    ReceiveOnly,
    Mandatory,
    Optional,
    NotPossible,
    Android,
    Ios,
    Desktop,
    Web,
    Lnd,
    CoreLightning,
    Eclair,
    Ldk,
    Custodial,
    NonCustodial,
    Hybrid,
    FullNode,
    LightClient,
    RemoteNode,
}

impl ValueTag {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "partial" => Ok(Self::Partial),
            "custom" => Ok(Self::Custom),
            "send_only" => Ok(Self::SendOnly),
            "receive_only" => Ok(Self::ReceiveOnly),
            "mandatory" => Ok(Self::Mandatory),
            "optional" => Ok(Self::Optional),
            "not_possible" => Ok(Self::NotPossible),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "desktop" => Ok(Self::Desktop),
            "web" => Ok(Self::Web),
            "lnd" => Ok(Self::Lnd),
            "core_lightning" => Ok(Self::CoreLightning),
            "eclair" => Ok(Self::Eclair),
            "ldk" => Ok(Self::Ldk),
            "custodial" => Ok(Self::Custodial),
            "non_custodial" => Ok(Self::NonCustodial),
            "hybrid" => Ok(Self::Hybrid),
            "full_node" => Ok(Self::FullNode),
            "light_client" => Ok(Self::LightClient),
            "remote_node" => Ok(Self::RemoteNode),
            _ => Err(ParseError::InvalidFormat(
                "value tag is not in the allowed set",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Partial => "partial",
            Self::Custom => "custom",
            Self::SendOnly => "send_only",
            Self::ReceiveOnly => "receive_only",
            Self::Mandatory => "mandatory",
            Self::Optional => "optional",
            Self::NotPossible => "not_possible",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Desktop => "desktop",
            Self::Web => "web",
            Self::Lnd => "lnd",
            Self::CoreLightning => "core_lightning",
            Self::Eclair => "eclair",
            Self::Ldk => "ldk",
            Self::Custodial => "custodial",
            Self::NonCustodial => "non_custodial",
            Self::Hybrid => "hybrid",
            Self::FullNode => "full_node",
            Self::LightClient => "light_client",
            Self::RemoteNode => "remote_node",
        }
    }

    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl Display for ValueTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature value as stored on an association.
///
/// Invariant: `custom_text` is `Some` if and only if the tag is
/// [`ValueTag::Custom`], and the text is never blank. Construct through
/// [`FeatureValue::tagged`], [`FeatureValue::custom`] or [`FeatureValue::new`]
/// to hold the invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct FeatureValue {
    value: ValueTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_text: Option<String>,
}

impl FeatureValue {
    pub fn tagged(value: ValueTag) -> Result<Self, ParseError> {
        if value.is_custom() {
            return Err(ParseError::InvalidFormat(
                "custom value requires custom_text",
            ));
        }
        Ok(Self {
            value,
            custom_text: None,
        })
    }

    pub fn custom(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty("custom_text"));
        }
        if trimmed.len() > CUSTOM_TEXT_MAX_LEN {
            return Err(ParseError::TooLong("custom_text", CUSTOM_TEXT_MAX_LEN));
        }
        Ok(Self {
            value: ValueTag::Custom,
            custom_text: Some(trimmed.to_string()),
        })
    }

    pub fn new(value: ValueTag, custom_text: Option<&str>) -> Result<Self, ParseError> {
        match (value.is_custom(), custom_text) {
            (true, Some(text)) => Self::custom(text),
            (true, None) => Err(ParseError::InvalidFormat(
                "custom value requires custom_text",
            )),
            (false, None) => Self::tagged(value),
            (false, Some(_)) => Err(ParseError::InvalidFormat(
                "custom_text is only allowed with the custom value",
            )),
        }
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        self.value
    }

    #[must_use]
    pub fn custom_text(&self) -> Option<&str> {
        self.custom_text.as_deref()
    }

    /// Re-checks the `custom`/`custom_text` pairing on values that bypassed
    /// the constructors, e.g. arrived through serde.
    pub fn validate(&self) -> Result<(), ParseError> {
        match (&self.custom_text, self.value.is_custom()) {
            (Some(text), true) => {
                if text.trim().is_empty() {
                    return Err(ParseError::Empty("custom_text"));
                }
                if text.len() > CUSTOM_TEXT_MAX_LEN {
                    return Err(ParseError::TooLong("custom_text", CUSTOM_TEXT_MAX_LEN));
                }
                Ok(())
            }
            (None, false) => Ok(()),
            (None, true) => Err(ParseError::InvalidFormat(
                "custom value requires custom_text",
            )),
            (Some(_), false) => Err(ParseError::InvalidFormat(
                "custom_text is only allowed with the custom value",
            )),
        }
    }
}
