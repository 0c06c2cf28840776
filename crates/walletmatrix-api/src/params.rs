// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use walletmatrix_model::{WalletId, WalletType};

use crate::errors::ApiError;

/// Optional `type` filter. Absent means no filter; anything outside the
/// closed wallet-type set is rejected.
pub fn parse_type_filter(
    query: &BTreeMap<String, String>,
) -> Result<Option<WalletType>, ApiError> {
    match query.get("type") {
        None => Ok(None),
        Some(raw) => WalletType::parse(raw)
            .map(Some)
            .map_err(|_| ApiError::invalid_param("type", raw)),
    }
}

/// The `wallets` list for the side-by-side view: exactly two ids,
/// comma-separated.
pub fn parse_compare_params(
    query: &BTreeMap<String, String>,
) -> Result<(WalletId, WalletId), ApiError> {
    let raw = query
        .get("wallets")
        .ok_or_else(|| ApiError::invalid_param("wallets", ""))?;
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let id = WalletId::parse(part.trim()).map_err(|_| ApiError::invalid_param("wallets", raw))?;
        ids.push(id);
    }
    match ids.as_slice() {
        [first, second] => Ok((*first, *second)),
        _ => Err(ApiError::invalid_param("wallets", raw)),
    }
}

/// Path id segment. A non-numeric id is a 400, not a 404.
pub fn parse_entity_id(raw: &str) -> Result<u64, ApiError> {
    WalletId::parse(raw)
        .map(|id| id.get())
        .map_err(|_| ApiError::invalid_param("id", raw))
}

#[cfg(test)]
mod tests {
    use super::{parse_compare_params, parse_entity_id, parse_type_filter};
    use crate::errors::ApiErrorCode;
    use std::collections::BTreeMap;
    use walletmatrix_model::{WalletId, WalletType};

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn type_filter_is_optional_and_closed() {
        assert_eq!(parse_type_filter(&query(&[])).expect("absent"), None);
        assert_eq!(
            parse_type_filter(&query(&[("type", "hardware")])).expect("hardware"),
            Some(WalletType::Hardware)
        );
        let err = parse_type_filter(&query(&[("type", "plasma")])).expect_err("unknown type");
        assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter);
    }

    #[test]
    fn compare_requires_exactly_two_ids() {
        let (a, b) =
            parse_compare_params(&query(&[("wallets", "3, 1")])).expect("two ids with spaces");
        assert_eq!(a, WalletId::new(3));
        assert_eq!(b, WalletId::new(1));

        for raw in ["", "1", "1,2,3", "1,zeus"] {
            let err = parse_compare_params(&query(&[("wallets", raw)])).expect_err(raw);
            assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter, "input {raw:?}");
        }
        let err = parse_compare_params(&query(&[])).expect_err("missing parameter");
        assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter);
    }

    #[test]
    fn entity_ids_reject_non_numeric_input() {
        assert_eq!(parse_entity_id("7").expect("numeric"), 7);
        for raw in ["", "  ", "-1", "zeus", "1.5"] {
            let err = parse_entity_id(raw).expect_err(raw);
            assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter, "input {raw:?}");
        }
    }
}
