// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use walletmatrix_store::{CatalogStore, NewsletterStore};

use crate::config::ApiConfig;
use crate::{handlers, middleware};

/// Shared handler state. Cheap to clone; every subsystem sits behind an
/// `Arc` and the catalog serializes its own writes.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub newsletter: Arc<NewsletterStore>,
    pub api: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: CatalogStore, newsletter: NewsletterStore) -> Self {
        Self::with_config(catalog, newsletter, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(
        catalog: CatalogStore,
        newsletter: NewsletterStore,
        api: ApiConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            newsletter: Arc::new(newsletter),
            api,
            ready: Arc::new(AtomicBool::new(true)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .route("/readyz", get(handlers::readyz_handler))
        .route("/v1/version", get(handlers::version_handler))
        .route(
            "/v1/wallets",
            get(handlers::wallets_handler).post(handlers::create_wallet_handler),
        )
        .route(
            "/v1/wallets/:id",
            get(handlers::wallet_handler)
                .put(handlers::update_wallet_handler)
                .delete(handlers::delete_wallet_handler),
        )
        .route(
            "/v1/wallets/:id/features",
            get(handlers::wallet_features_handler),
        )
        .route(
            "/v1/wallets/:id/features/:feature_id",
            put(handlers::set_association_handler),
        )
        .route(
            "/v1/features",
            get(handlers::features_handler).post(handlers::create_feature_handler),
        )
        .route(
            "/v1/features/:id",
            put(handlers::update_feature_handler).delete(handlers::delete_feature_handler),
        )
        .route("/v1/catalog", get(handlers::catalog_handler))
        .route("/v1/compare", get(handlers::compare_handler))
        .route(
            "/v1/newsletter/subscriptions",
            post(handlers::subscribe_handler),
        )
        .route(
            "/v1/newsletter/subscriptions/:email",
            delete(handlers::unsubscribe_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::audit_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
