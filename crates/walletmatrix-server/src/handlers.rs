// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::info;
use walletmatrix_api::{
    association_dto, association_draft, error_status, feature_dto, feature_draft,
    parse_compare_params, parse_entity_id, parse_type_filter, view_dto, wallet_dto, wallet_draft,
    ApiError, AssociationBody, FeatureBody, FeatureDeletedDto, FeatureDto, SetAssociationDto,
    SubscriptionBody, SubscriptionDto, SubscriptionRemovedDto, WalletBody, WalletDeletedDto,
    WalletDto, WalletWithFeaturesDto,
};
use walletmatrix_model::{FeatureId, WalletId};
use walletmatrix_store::normalize_email;

use crate::app::AppState;
use crate::CRATE_NAME;

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.chars().take(128).collect();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

fn api_error_response(err: ApiError, request_id: &str) -> Response {
    let status =
        StatusCode::from_u16(error_status(&err)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let err = err.with_request_id(request_id);
    with_request_id(
        (status, Json(json!({"error": err}))).into_response(),
        request_id,
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, payload: T, request_id: &str) -> Response {
    with_request_id((status, Json(payload)).into_response(), request_id)
}

fn parse_body<T: serde::de::DeserializeOwned>(bytes: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::invalid_body(e.to_string()))
}

fn require_writes(state: &AppState) -> Result<(), ApiError> {
    if state.api.enable_writes {
        Ok(())
    } else {
        Err(ApiError::writes_disabled())
    }
}

fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert("cache-control", value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

pub(crate) async fn landing_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let wallets = state.catalog.list_wallets(None).await;
    let mut list = String::new();
    for wallet in &wallets {
        list.push_str(&format!(
            "<li><code>{}</code> - <a href=\"/v1/wallets/{}/features\">features</a></li>",
            wallet.name,
            wallet.id.get()
        ));
    }
    if list.is_empty() {
        list.push_str("<li>No wallets loaded.</li>");
    }
    let html = format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>WalletMatrix</title></head><body>\
<h1>WalletMatrix Comparison Catalog</h1>\
<p>Version: <code>{}</code></p>\
<h2>Wallets</h2><ul>{}</ul>\
<h2>Example Queries</h2>\
<ul>\
<li><a href=\"/v1/wallets\">/v1/wallets</a></li>\
<li><a href=\"/v1/features?type=lightning\">/v1/features?type=lightning</a></li>\
<li><a href=\"/v1/catalog\">/v1/catalog</a></li>\
<li><a href=\"/v1/compare?wallets=1,2\">/v1/compare?wallets=1,2</a></li>\
</ul>\
</body></html>",
        env!("CARGO_PKG_VERSION"),
        list
    );
    let mut resp = Response::new(Body::from(html));
    *resp.status_mut() = StatusCode::OK;
    resp.headers_mut().insert(
        "content-type",
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    with_request_id(resp, &request_id)
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    with_request_id((StatusCode::OK, "ok").into_response(), &request_id)
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    if state.ready.load(Ordering::Relaxed) {
        with_request_id((StatusCode::OK, "ready").into_response(), &request_id)
    } else {
        with_request_id(
            (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response(),
            &request_id,
        )
    }
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let payload = json!({
        "service": {
            "name": "walletmatrix",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "server": {
            "crate": CRATE_NAME,
            "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
        },
        "api": {
            "version": walletmatrix_api::API_VERSION,
        }
    });
    let mut response = Json(payload).into_response();
    if let Ok(value) = HeaderValue::from_str("public, max-age=30") {
        response.headers_mut().insert("cache-control", value);
    }
    with_request_id(response, &request_id)
}

pub(crate) async fn wallets_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let type_filter = match parse_type_filter(&params) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    let wallets = state.catalog.list_wallets(type_filter).await;
    let rows: Vec<WalletDto> = wallets.iter().map(wallet_dto).collect();
    json_response(StatusCode::OK, rows, &request_id)
}

pub(crate) async fn wallet_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let id = match parse_entity_id(&id) {
        Ok(raw) => WalletId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.wallet(id).await {
        Ok(wallet) => json_response(StatusCode::OK, wallet_dto(&wallet), &request_id),
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn create_wallet_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let body: WalletBody = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.create_wallet(wallet_draft(body)).await {
        Ok(wallet) => {
            info!(request_id = %request_id, wallet_id = wallet.id.get(), name = %wallet.name, "wallet created");
            json_response(StatusCode::CREATED, wallet_dto(&wallet), &request_id)
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn update_wallet_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let id = match parse_entity_id(&id) {
        Ok(raw) => WalletId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    let body: WalletBody = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.update_wallet(id, wallet_draft(body)).await {
        Ok(wallet) => {
            info!(request_id = %request_id, wallet_id = wallet.id.get(), "wallet updated");
            json_response(StatusCode::OK, wallet_dto(&wallet), &request_id)
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn delete_wallet_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let id = match parse_entity_id(&id) {
        Ok(raw) => WalletId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.delete_wallet(id).await {
        Ok((wallet, dropped)) => {
            info!(
                request_id = %request_id,
                wallet_id = wallet.id.get(),
                dropped_associations = dropped,
                "wallet deleted"
            );
            json_response(
                StatusCode::OK,
                WalletDeletedDto {
                    deleted: wallet_dto(&wallet),
                    dropped_associations: dropped as u64,
                },
                &request_id,
            )
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn wallet_features_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let id = match parse_entity_id(&id) {
        Ok(raw) => WalletId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.wallet_view(id).await {
        Ok(view) => json_response(StatusCode::OK, view_dto(&view), &request_id),
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn set_association_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((wallet_id, feature_id)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let wallet_id = match parse_entity_id(&wallet_id) {
        Ok(raw) => WalletId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    let feature_id = match parse_entity_id(&feature_id) {
        Ok(raw) => FeatureId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    let body: AssociationBody = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state
        .catalog
        .set_association(wallet_id, feature_id, association_draft(body))
        .await
    {
        Ok((association, outcome)) => {
            info!(
                request_id = %request_id,
                wallet_id = association.wallet_id.get(),
                feature_id = association.feature_id.get(),
                outcome = ?outcome,
                "association set"
            );
            json_response(
                StatusCode::OK,
                SetAssociationDto {
                    association: association_dto(&association),
                    outcome,
                },
                &request_id,
            )
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn features_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let type_filter = match parse_type_filter(&params) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    let features = state.catalog.list_features(type_filter).await;
    let rows: Vec<FeatureDto> = features.iter().map(feature_dto).collect();
    json_response(StatusCode::OK, rows, &request_id)
}

pub(crate) async fn create_feature_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let body: FeatureBody = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.create_feature(feature_draft(body)).await {
        Ok(feature) => {
            info!(request_id = %request_id, feature_id = feature.id.get(), key = %feature.key.as_str(), "feature created");
            json_response(StatusCode::CREATED, feature_dto(&feature), &request_id)
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn update_feature_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let id = match parse_entity_id(&id) {
        Ok(raw) => FeatureId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    let body: FeatureBody = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.update_feature(id, feature_draft(body)).await {
        Ok(feature) => {
            info!(request_id = %request_id, feature_id = feature.id.get(), "feature updated");
            json_response(StatusCode::OK, feature_dto(&feature), &request_id)
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn delete_feature_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    if let Err(e) = require_writes(&state) {
        return api_error_response(e, &request_id);
    }
    let id = match parse_entity_id(&id) {
        Ok(raw) => FeatureId::new(raw),
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.delete_feature(id).await {
        Ok((feature, dropped)) => {
            info!(
                request_id = %request_id,
                feature_id = feature.id.get(),
                dropped_associations = dropped,
                "feature deleted"
            );
            json_response(
                StatusCode::OK,
                FeatureDeletedDto {
                    deleted: feature_dto(&feature),
                    dropped_associations: dropped as u64,
                },
                &request_id,
            )
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn catalog_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let type_filter = match parse_type_filter(&params) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    let views = state.catalog.views(type_filter).await;
    let rows: Vec<WalletWithFeaturesDto> = views.iter().map(view_dto).collect();
    let etag = format!(
        "\"{}\"",
        sha256_hex(&serde_json::to_vec(&rows).unwrap_or_default())
    );
    if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(resp.headers_mut(), state.api.catalog_ttl, &etag);
        return with_request_id(resp, &request_id);
    }
    let mut response = Json(rows).into_response();
    put_cache_headers(response.headers_mut(), state.api.catalog_ttl, &etag);
    with_request_id(response, &request_id)
}

pub(crate) async fn compare_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let (first, second) = match parse_compare_params(&params) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.catalog.compare(&[first, second]).await {
        Ok(views) => {
            let rows: Vec<WalletWithFeaturesDto> = views.iter().map(view_dto).collect();
            json_response(StatusCode::OK, rows, &request_id)
        }
        Err(e) => api_error_response(e.into(), &request_id),
    }
}

pub(crate) async fn subscribe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let body: SubscriptionBody = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    let email = match normalize_email(&body.email) {
        Ok(v) => v,
        Err(e) => return api_error_response(e.into(), &request_id),
    };
    let store = Arc::clone(&state.newsletter);
    let stored = email.clone();
    let outcome = tokio::task::spawn_blocking(move || store.subscribe(&stored)).await;
    match outcome {
        Ok(Ok(created)) => {
            info!(request_id = %request_id, created, "newsletter subscription");
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            json_response(status, SubscriptionDto { email, created }, &request_id)
        }
        Ok(Err(e)) => api_error_response(e.into(), &request_id),
        Err(e) => api_error_response(
            ApiError::internal(format!("newsletter task failed: {e}")),
            &request_id,
        ),
    }
}

pub(crate) async fn unsubscribe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(email): Path<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let email = match normalize_email(&email) {
        Ok(v) => v,
        Err(e) => return api_error_response(e.into(), &request_id),
    };
    let store = Arc::clone(&state.newsletter);
    let stored = email.clone();
    let outcome = tokio::task::spawn_blocking(move || store.unsubscribe(&stored)).await;
    match outcome {
        Ok(Ok(removed)) => {
            info!(request_id = %request_id, removed, "newsletter unsubscribe");
            json_response(
                StatusCode::OK,
                SubscriptionRemovedDto { email, removed },
                &request_id,
            )
        }
        Ok(Err(e)) => api_error_response(e.into(), &request_id),
        Err(e) => api_error_response(
            ApiError::internal(format!("newsletter task failed: {e}")),
            &request_id,
        ),
    }
}
