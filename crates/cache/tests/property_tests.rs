//! Property-based tests for the cache
//!
//! These use proptest to check the store invariants across a wide range of
//! keys and values, with and without compression.

use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;
use vir_cache::{dir_descriptor, dir_descriptor_with_gzip, new_cache, CacheError, SharedStore};

/// Keys that are already safe base names
fn arb_safe_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]{1,32}",
        "[a-zA-Z0-9]{1,12}(-[a-zA-Z0-9]{1,12}){0,3}",
        "[a-zA-Z0-9]{1,16}\\.[a-z]{1,4}",
    ]
}

/// Keys that must never reach the filesystem
fn arb_unsafe_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,8}\\.\\.[a-z/]{0,8}",
        "[a-z]{0,8}/[a-z]{0,8}",
        "[a-z]{0,8}\\\\[a-z]{0,8}",
        "[a-z]{0,8}\\x00[a-z]{0,8}",
        "\\.\\./[a-z]{1,8}",
    ]
}

fn arb_value() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..64),
        prop::collection::vec(any::<u8>(), 64..8192),
    ]
}

fn open(dir: &TempDir, gzip: bool) -> SharedStore {
    let descriptor = if gzip {
        dir_descriptor_with_gzip(dir.path())
    } else {
        dir_descriptor(dir.path())
    };
    new_cache(&descriptor).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: what is set is what is read back
    #[test]
    fn prop_roundtrip(key in arb_safe_key(), value in arb_value(), gzip in any::<bool>()) {
        let temp_dir = TempDir::new().unwrap();
        let cache = open(&temp_dir, gzip);

        cache.set(&key, &value).unwrap();
        prop_assert_eq!(cache.get(&key).unwrap(), Some(value));
    }

    /// Property: keys never written are absent, not errors
    #[test]
    fn prop_unwritten_is_absent(key in arb_safe_key(), gzip in any::<bool>()) {
        let temp_dir = TempDir::new().unwrap();
        let cache = open(&temp_dir, gzip);
        prop_assert_eq!(cache.get(&key).unwrap(), None);
    }

    /// Property: delete is idempotent and removes the value
    #[test]
    fn prop_delete(key in arb_safe_key(), value in arb_value(), gzip in any::<bool>()) {
        let temp_dir = TempDir::new().unwrap();
        let cache = open(&temp_dir, gzip);

        cache.delete(&key).unwrap();
        cache.set(&key, &value).unwrap();
        cache.delete(&key).unwrap();
        prop_assert_eq!(cache.get(&key).unwrap(), None);
        cache.delete(&key).unwrap();
    }

    /// Property: unsafe keys fail every operation and leave the root empty
    #[test]
    fn prop_unsafe_keys_rejected(key in arb_unsafe_key(), gzip in any::<bool>()) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir(&root).unwrap();
        let cache = new_cache(&if gzip {
            dir_descriptor_with_gzip(&root)
        } else {
            dir_descriptor(&root)
        })
        .unwrap();

        let set_is_unsafe = matches!(cache.set(&key, b"x"), Err(CacheError::UnsafeKey { .. }));
        let get_is_unsafe = matches!(cache.get(&key), Err(CacheError::UnsafeKey { .. }));
        let delete_is_unsafe = matches!(cache.delete(&key), Err(CacheError::UnsafeKey { .. }));
        prop_assert!(set_is_unsafe);
        prop_assert!(get_is_unsafe);
        prop_assert!(delete_is_unsafe);

        prop_assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
        prop_assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    /// Property: a view of a view behaves like one view with both prefixes
    #[test]
    fn prop_prefix_composition(
        outer in "[a-z]{1,6}-",
        inner in "[a-z]{1,6}-",
        key in "[a-zA-Z0-9]{1,16}",
        value in arb_value(),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let cache = open(&temp_dir, false);
        let nested = cache.with_prefix(&outer).with_prefix(&inner);
        let flat = cache.with_prefix(&format!("{outer}{inner}"));

        nested.set(&key, &value).unwrap();
        prop_assert_eq!(flat.get(&key).unwrap(), Some(value.clone()));
        prop_assert_eq!(cache.get(&format!("{outer}{inner}{key}")).unwrap(), Some(value));

        flat.delete(&key).unwrap();
        prop_assert_eq!(nested.get(&key).unwrap(), None);
    }
}
