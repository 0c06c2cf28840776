// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use walletmatrix_store::{StoreError, StoreErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    InvalidRequestBody,
    ValidationFailed,
    NotFound,
    WritesDisabled,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"parameter": name, "value": value}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::InvalidRequestBody,
            "invalid request body",
            json!({"reason": reason.into()}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn validation_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"reason": reason.into()}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message, json!({}), "req-unknown")
    }

    #[must_use]
    pub fn writes_disabled() -> Self {
        Self::new(
            ApiErrorCode::WritesDisabled,
            "write operations are disabled on this deployment",
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}), "req-unknown")
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value.code {
            StoreErrorCode::NotFound => Self::not_found(value.message),
            StoreErrorCode::Validation => Self::validation_failed(value.message),
            _ => Self::internal(value.message),
        }
    }
}

/// HTTP status for the error envelope. Not-found is a 404 result, never a
/// process failure; semantic validation is distinguished from undecodable
/// input.
#[must_use]
pub fn error_status(error: &ApiError) -> u16 {
    match error.code {
        ApiErrorCode::InvalidQueryParameter | ApiErrorCode::InvalidRequestBody => 400,
        ApiErrorCode::WritesDisabled => 403,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::ValidationFailed => 422,
        _ => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::{error_status, ApiError, ApiErrorCode};
    use walletmatrix_store::{StoreError, StoreErrorCode};

    #[test]
    fn store_errors_map_to_distinguishable_codes() {
        let not_found: ApiError = StoreError::new(StoreErrorCode::NotFound, "wallet 9").into();
        assert_eq!(not_found.code, ApiErrorCode::NotFound);
        assert_eq!(error_status(&not_found), 404);

        let invalid: ApiError = StoreError::new(StoreErrorCode::Validation, "bad value").into();
        assert_eq!(invalid.code, ApiErrorCode::ValidationFailed);
        assert_eq!(error_status(&invalid), 422);

        let internal: ApiError = StoreError::new(StoreErrorCode::Internal, "lock").into();
        assert_eq!(error_status(&internal), 500);
    }

    #[test]
    fn codes_serialize_snake_case() {
        let err = ApiError::writes_disabled();
        let wire = serde_json::to_value(&err).expect("serialize");
        assert_eq!(wire["code"], "writes_disabled");
        assert_eq!(error_status(&err), 403);
    }

    #[test]
    fn request_id_is_stamped_by_the_builder() {
        let err = ApiError::invalid_param("type", "plasma").with_request_id("req-42");
        assert_eq!(err.request_id, "req-42");
        assert_eq!(err.details["parameter"], "type");
    }
}
