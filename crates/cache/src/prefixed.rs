//! Key-prefix views over a store
//!
//! A view lets logically separate namespaces share one physical store and
//! its lock. It owns nothing but its prefix; dropping it leaves the parent
//! and its files untouched.

use crate::errors::{CacheError, Result};
use crate::keys::is_safe_key;
use crate::traits::{SharedStore, Store};
use std::sync::Arc;

/// A store view that prepends a fixed prefix to every key
#[derive(Debug)]
pub struct PrefixedStore {
    /// Always the physical store; views never wrap other views
    parent: SharedStore,
    prefix: String,
}

impl PrefixedStore {
    pub(crate) fn new(parent: SharedStore, prefix: impl Into<String>) -> Self {
        Self {
            parent,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn scoped_key(&self, key: &str) -> Result<String> {
        let scoped = format!("{}{}", self.prefix, key);
        if is_safe_key(&scoped) {
            Ok(scoped)
        } else {
            Err(CacheError::unsafe_key(scoped))
        }
    }
}

impl Store for PrefixedStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.parent.get(&self.scoped_key(key)?)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.parent.set(&self.scoped_key(key)?, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.parent.delete(&self.scoped_key(key)?)
    }

    fn with_prefix(&self, prefix: &str) -> SharedStore {
        Arc::new(Self::new(
            Arc::clone(&self.parent),
            format!("{}{}", self.prefix, prefix),
        ))
    }
}
