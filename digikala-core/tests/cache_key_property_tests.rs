//! Property-based tests for cache key derivation.
//!
//! The cache key must be a stable fingerprint: fixed width, deterministic,
//! independent of parameter insertion order, and sensitive to any change in
//! endpoint or parameter values.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ============================================================================
// Test Generators
// ============================================================================

/// Strategy for generating endpoint paths.
fn endpoint_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_/-]{0,40}".prop_map(|s| format!("/{s}"))
}

/// Strategy for generating scalar JSON values.
fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z0-9 _-]{0,20}".prop_map(Value::from),
    ]
}

/// Strategy for generating parameter sets with unique keys.
fn params_strategy() -> impl Strategy<Value = BTreeMap<String, Value>> {
    prop::collection::btree_map("[a-z_]{1,12}", scalar_value_strategy(), 0..8)
}

fn to_map(pairs: &BTreeMap<String, Value>) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// *For any* endpoint and parameter set, the key is 32 lowercase hex characters.
    #[test]
    fn prop_cache_key_is_fixed_width_hex(
        endpoint in endpoint_strategy(),
        pairs in params_strategy(),
    ) {
        let map = to_map(&pairs);
        let key = digikala_core::cache_key(&endpoint, Some(&map));
        prop_assert_eq!(key.len(), 32);
        prop_assert!(
            key.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "key is not lowercase hex: {}",
            key
        );
    }

    /// *For any* input, deriving the key twice yields the same value.
    #[test]
    fn prop_cache_key_is_deterministic(
        endpoint in endpoint_strategy(),
        pairs in params_strategy(),
    ) {
        let map = to_map(&pairs);
        prop_assert_eq!(
            digikala_core::cache_key(&endpoint, Some(&map)),
            digikala_core::cache_key(&endpoint, Some(&map))
        );
    }

    /// *For any* parameter set, insertion order does not affect the key.
    #[test]
    fn prop_cache_key_ignores_insertion_order(
        endpoint in endpoint_strategy(),
        pairs in params_strategy(),
    ) {
        let forward: Map<String, Value> =
            pairs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let reversed: Map<String, Value> =
            pairs.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
        prop_assert_eq!(
            digikala_core::cache_key(&endpoint, Some(&forward)),
            digikala_core::cache_key(&endpoint, Some(&reversed))
        );
    }

    /// *For any* endpoint, absent parameters and an empty map are the same request.
    #[test]
    fn prop_none_equals_empty_params(endpoint in endpoint_strategy()) {
        prop_assert_eq!(
            digikala_core::cache_key(&endpoint, None),
            digikala_core::cache_key(&endpoint, Some(&Map::new()))
        );
    }

    /// *For any* two distinct endpoints, the same parameters yield distinct keys.
    #[test]
    fn prop_endpoint_distinguishes_keys(
        first in endpoint_strategy(),
        second in endpoint_strategy(),
        pairs in params_strategy(),
    ) {
        prop_assume!(first != second);
        let map = to_map(&pairs);
        prop_assert_ne!(
            digikala_core::cache_key(&first, Some(&map)),
            digikala_core::cache_key(&second, Some(&map))
        );
    }

    /// *For any* parameter set, changing one value changes the key.
    #[test]
    fn prop_value_change_distinguishes_keys(
        endpoint in endpoint_strategy(),
        pairs in params_strategy(),
        key in "[a-z_]{1,12}",
        first in "[a-z0-9]{1,10}",
        second in "[a-z0-9]{1,10}",
    ) {
        prop_assume!(first != second);
        let mut before = to_map(&pairs);
        before.insert(key.clone(), Value::from(first));
        let mut after = before.clone();
        after.insert(key, Value::from(second));
        prop_assert_ne!(
            digikala_core::cache_key(&endpoint, Some(&before)),
            digikala_core::cache_key(&endpoint, Some(&after))
        );
    }
}
