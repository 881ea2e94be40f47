// ==============================================
// SERDE CONFIG TESTS (integration, feature "serde")
// ==============================================

use idcache::builder::CachePolicy;
use idcache::config::{CacheConfig, DEFAULT_CAPACITY};
use idcache::traits::EntityCache;

#[test]
fn deserializes_settings_section() {
    let config: CacheConfig = serde_json::from_str(r#"{ "type": "LFU", "capacity": 500 }"#).unwrap();
    assert_eq!(config.policy, CachePolicy::Lfu);
    assert_eq!(config.capacity, 500);
}

#[test]
fn accepts_policy_alias_and_lowercase_names() {
    let config: CacheConfig = serde_json::from_str(r#"{ "policy": "lru", "capacity": 3 }"#).unwrap();
    assert_eq!(config.policy, CachePolicy::Lru);
    assert_eq!(config.capacity, 3);
}

#[test]
fn missing_fields_take_defaults() {
    let config: CacheConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CacheConfig::default());

    let config: CacheConfig = serde_json::from_str(r#"{ "type": "LFU" }"#).unwrap();
    assert_eq!(config.capacity, DEFAULT_CAPACITY);
}

#[test]
fn unknown_policy_is_rejected() {
    let result = serde_json::from_str::<CacheConfig>(r#"{ "type": "ARC" }"#);
    assert!(result.is_err());
}

#[test]
fn serializes_with_upper_case_policy() {
    let config = CacheConfig::default().with_policy(CachePolicy::Lfu).with_capacity(7);
    let json = serde_json::to_value(config).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "LFU", "capacity": 7 }));
}

#[test]
fn deserialized_config_builds_a_working_cache() {
    let config: CacheConfig = serde_json::from_str(r#"{ "type": "LRU", "capacity": 1 }"#).unwrap();
    let cache = config.build::<u32, (u32, &str)>();
    cache.upsert((1, "a"));
    cache.upsert((2, "b"));
    assert_eq!(cache.size(), 1);
    assert_eq!(cache.get(&2), Some((2, "b")));
}
