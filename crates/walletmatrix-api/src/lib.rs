// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! HTTP-facing types for the walletmatrix service: response and request
//! DTOs, query parameter validation and the error envelope. Handlers stay
//! thin; everything they put on or take off the wire lives here.

mod convert;
mod dto;
mod errors;
mod params;

pub use convert::{
    association_dto, association_draft, feature_dto, feature_draft, view_dto, wallet_dto,
    wallet_draft,
};
pub use dto::{
    AssociationBody, AssociationDto, FeatureBody, FeatureDeletedDto, FeatureDto, FeatureEntryDto,
    SetAssociationDto, SubscriptionBody, SubscriptionDto, SubscriptionRemovedDto, WalletBody,
    WalletDeletedDto, WalletDto, WalletWithFeaturesDto,
};
pub use errors::{error_status, ApiError, ApiErrorCode};
pub use params::{parse_compare_params, parse_entity_id, parse_type_filter};

pub const CRATE_NAME: &str = "walletmatrix-api";
pub const API_VERSION: &str = "v1";
