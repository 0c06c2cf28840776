// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct WalletId(u64);

impl WalletId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("wallet id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("wallet id"));
        }
        match input.parse::<u64>() {
            Ok(raw) => Ok(Self(raw)),
            Err(_) => Err(ParseError::InvalidFormat(
                "wallet id must be a non-negative decimal integer",
            )),
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for WalletId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct FeatureId(u64);

impl FeatureId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("feature id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("feature id"));
        }
        match input.parse::<u64>() {
            Ok(raw) => Ok(Self(raw)),
            Err(_) => Err(ParseError::InvalidFormat(
                "feature id must be a non-negative decimal integer",
            )),
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
