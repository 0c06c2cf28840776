use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

/// HTTP-side configuration. Dataset and newsletter paths are resolved in
/// `main` and never reach the handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub max_uri_bytes: usize,
    pub catalog_ttl: Duration,
    pub enable_writes: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            max_uri_bytes: 2048,
            catalog_ttl: Duration::from_secs(30),
            enable_writes: true,
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 || api.max_uri_bytes == 0 {
        return Err("api size limits must be > 0".to_string());
    }
    if api.catalog_ttl.is_zero() {
        return Err("catalog ttl must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        validate_startup_config(&ApiConfig::default()).expect("default config");
    }

    #[test]
    fn zero_size_limits_are_rejected() {
        let api = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config(&api).expect_err("zero body limit");
        assert!(err.contains("size limits"));
    }

    #[test]
    fn zero_catalog_ttl_is_rejected() {
        let api = ApiConfig {
            catalog_ttl: Duration::ZERO,
            ..ApiConfig::default()
        };
        let err = validate_startup_config(&api).expect_err("zero ttl");
        assert!(err.contains("ttl"));
    }
}
