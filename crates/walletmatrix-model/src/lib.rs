#![forbid(unsafe_code)]
//! Wallet catalog model SSOT.
//!
//! ```compile_fail
//! use walletmatrix_model::WalletType;
//!
//! fn exhaustive_match(t: WalletType) -> &'static str {
//!     match t {
//!         WalletType::Lightning => "l",
//!         WalletType::Onchain => "o",
//!         WalletType::Hardware => "h",
//!     }
//! }
//! ```

mod association;
mod catalog;
mod feature;
mod ids;
mod value;
mod view;
mod wallet;

pub use association::{WalletFeature, NOTES_MAX_LEN};
pub use catalog::{Catalog, CatalogError, UpsertOutcome};
pub use feature::{
    normalize_feature_key, parse_feature_key, Feature, FeatureCategory, FeatureKey, KEY_MAX_LEN,
};
pub use ids::{FeatureId, ParseError, WalletId};
pub use value::{FeatureValue, ValueTag, CUSTOM_TEXT_MAX_LEN};
pub use view::{assemble_views, WalletFeatureEntry, WalletWithFeatures};
pub use wallet::{
    parse_wallet_type, Wallet, WalletType, DESCRIPTION_MAX_LEN, NAME_MAX_LEN, WEBSITE_MAX_LEN,
};

pub const CRATE_NAME: &str = "walletmatrix-model";
