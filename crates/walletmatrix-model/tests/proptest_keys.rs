use proptest::prelude::*;
use proptest::test_runner::Config;
use walletmatrix_model::normalize_feature_key;

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn normalized_keys_are_snake_case(input in ".{0,64}") {
        let normalized = normalize_feature_key(&input);
        prop_assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!normalized.starts_with('_'));
        prop_assert!(!normalized.ends_with('_'));
        prop_assert!(!normalized.contains("__"));
    }

    #[test]
    fn normalization_is_idempotent(input in ".{0,64}") {
        let once = normalize_feature_key(&input);
        prop_assert_eq!(normalize_feature_key(&once), once.clone());
    }

    #[test]
    fn alphanumeric_content_survives_normalization(input in "[A-Za-z0-9]{1,32}") {
        prop_assert_eq!(normalize_feature_key(&input), input.to_ascii_lowercase());
    }
}
