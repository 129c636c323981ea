//! The store abstraction shared by every backend and view

use crate::errors::Result;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a store, as returned by the factory
pub type SharedStore = Arc<dyn Store>;

/// A durable mapping from sanitized keys to opaque byte values.
///
/// All operations block the calling thread until they complete. Keys must
/// pass [`crate::keys::is_safe_key`] (after any view prefix is applied) or
/// the operation fails with [`crate::CacheError::UnsafeKey`] before any
/// file is touched.
pub trait Store: Send + Sync + fmt::Debug {
    /// Get the value for a key. Returns `None` if nothing is stored under it,
    /// which is distinct from an empty value.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a key. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Derive a view that prepends `prefix` to every key.
    ///
    /// The view shares the physical store and its lock; deriving from a
    /// view composes the prefixes (outer first) rather than nesting.
    fn with_prefix(&self, prefix: &str) -> SharedStore;
}
