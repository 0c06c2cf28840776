// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ParseError, WalletId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const NAME_MAX_LEN: usize = 128;
pub const WEBSITE_MAX_LEN: usize = 512;
pub const DESCRIPTION_MAX_LEN: usize = 4096;

pub fn parse_wallet_type(input: &str) -> Result<WalletType, ParseError> {
    WalletType::parse(input)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum WalletType {
    Lightning,
    Onchain,
    Hardware,
}

impl WalletType {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "lightning" => Ok(Self::Lightning),
            "onchain" => Ok(Self::Onchain),
            "hardware" => Ok(Self::Hardware),
            _ => Err(ParseError::InvalidFormat(
                "wallet type must be one of 'lightning', 'onchain', 'hardware'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lightning => "lightning",
            Self::Onchain => "onchain",
            Self::Hardware => "hardware",
        }
    }
}

impl Display for WalletType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Wallet {
    pub id: WalletId,
    pub name: String,
    pub website: String,
    pub description: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl Wallet {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: WalletId,
        name: String,
        website: String,
        description: String,
        wallet_type: WalletType,
        logo: Option<String>,
        availability: Option<String>,
        order: i64,
    ) -> Self {
        Self {
            id,
            name,
            website,
            description,
            wallet_type,
            logo,
            availability,
            order,
        }
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.name.is_empty() {
            return Err(ParseError::Empty("wallet name"));
        }
        if self.name.trim() != self.name {
            return Err(ParseError::Trimmed("wallet name"));
        }
        if self.name.len() > NAME_MAX_LEN {
            return Err(ParseError::TooLong("wallet name", NAME_MAX_LEN));
        }
        if self.website.is_empty() {
            return Err(ParseError::Empty("wallet website"));
        }
        if self.website.len() > WEBSITE_MAX_LEN {
            return Err(ParseError::TooLong("wallet website", WEBSITE_MAX_LEN));
        }
        if !(self.website.starts_with("https://") || self.website.starts_with("http://")) {
            return Err(ParseError::InvalidFormat(
                "wallet website must be an http(s) URL",
            ));
        }
        if self.description.len() > DESCRIPTION_MAX_LEN {
            return Err(ParseError::TooLong("wallet description", DESCRIPTION_MAX_LEN));
        }
        if let Some(logo) = &self.logo {
            if logo.trim().is_empty() {
                return Err(ParseError::InvalidFormat("wallet logo key must not be blank"));
            }
        }
        if let Some(availability) = &self.availability {
            if availability.trim().is_empty() {
                return Err(ParseError::InvalidFormat(
                    "wallet availability must not be blank",
                ));
            }
        }
        Ok(())
    }
}
