// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Shared state for the walletmatrix service: the in-memory catalog behind
//! serialized administrative writes, and the SQLite-backed newsletter
//! subscription table.

mod catalog;
mod newsletter;

use std::fmt::{Display, Formatter};

use walletmatrix_model::{CatalogError, ParseError};

pub use catalog::{AssociationDraft, CatalogStore, FeatureDraft, WalletDraft};
pub use newsletter::{normalize_email, NewsletterStore, EMAIL_MAX_LEN};

pub const CRATE_NAME: &str = "walletmatrix-store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == StoreErrorCode::NotFound
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<ParseError> for StoreError {
    fn from(value: ParseError) -> Self {
        Self::new(StoreErrorCode::Validation, value.to_string())
    }
}

impl From<CatalogError> for StoreError {
    fn from(value: CatalogError) -> Self {
        let code = match value {
            CatalogError::DuplicateWallet(_) | CatalogError::DuplicateFeature(_) => {
                StoreErrorCode::Conflict
            }
            CatalogError::UnknownWallet(_) | CatalogError::UnknownFeature(_) => {
                StoreErrorCode::NotFound
            }
            _ => StoreErrorCode::Internal,
        };
        Self::new(code, value.to_string())
    }
}
