// SPDX-License-Identifier: Apache-2.0

use walletmatrix_model::{Feature, Wallet, WalletFeature, WalletWithFeatures};
use walletmatrix_store::{AssociationDraft, FeatureDraft, WalletDraft};

use crate::dto::{
    AssociationBody, AssociationDto, FeatureBody, FeatureDto, FeatureEntryDto, WalletBody,
    WalletDto, WalletWithFeaturesDto,
};

#[must_use]
pub fn wallet_dto(wallet: &Wallet) -> WalletDto {
    WalletDto {
        id: wallet.id.get(),
        name: wallet.name.clone(),
        website: wallet.website.clone(),
        description: wallet.description.clone(),
        wallet_type: wallet.wallet_type,
        logo: wallet.logo.clone(),
        availability: wallet.availability.clone(),
        order: wallet.order,
    }
}

#[must_use]
pub fn feature_dto(feature: &Feature) -> FeatureDto {
    FeatureDto {
        id: feature.id.get(),
        key: feature.key.as_str().to_string(),
        name: feature.name.clone(),
        description: feature.description.clone(),
        wallet_type: feature.wallet_type,
        category: feature.category,
        order: feature.order,
        info_link: feature.info_link.clone(),
    }
}

#[must_use]
pub fn association_dto(association: &WalletFeature) -> AssociationDto {
    AssociationDto {
        wallet_id: association.wallet_id.get(),
        feature_id: association.feature_id.get(),
        value: association.value.tag(),
        custom_text: association.value.custom_text().map(str::to_string),
        reference_link: association.reference_link.clone(),
        notes: association.notes.clone(),
    }
}

#[must_use]
pub fn view_dto(view: &WalletWithFeatures) -> WalletWithFeaturesDto {
    WalletWithFeaturesDto {
        id: view.wallet.id.get(),
        name: view.wallet.name.clone(),
        website: view.wallet.website.clone(),
        description: view.wallet.description.clone(),
        wallet_type: view.wallet.wallet_type,
        logo: view.wallet.logo.clone(),
        availability: view.wallet.availability.clone(),
        order: view.wallet.order,
        features: view
            .features
            .iter()
            .map(|entry| FeatureEntryDto {
                feature_id: entry.feature_id.get(),
                name: entry.name.clone(),
                description: entry.description.clone(),
                category: entry.category,
                value: entry.value,
                custom_text: entry.custom_text.clone(),
                reference_link: entry.reference_link.clone(),
                notes: entry.notes.clone(),
            })
            .collect(),
    }
}

#[must_use]
pub fn wallet_draft(body: WalletBody) -> WalletDraft {
    WalletDraft {
        name: body.name,
        website: body.website,
        description: body.description,
        wallet_type: body.wallet_type,
        logo: body.logo,
        availability: body.availability,
        order: body.order,
    }
}

#[must_use]
pub fn feature_draft(body: FeatureBody) -> FeatureDraft {
    FeatureDraft {
        key: body.key,
        name: body.name,
        description: body.description,
        wallet_type: body.wallet_type,
        category: body.category,
        order: body.order,
        info_link: body.info_link,
    }
}

#[must_use]
pub fn association_draft(body: AssociationBody) -> AssociationDraft {
    AssociationDraft {
        value: body.value,
        custom_text: body.custom_text,
        reference_link: body.reference_link,
        notes: body.notes,
    }
}
