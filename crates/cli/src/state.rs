//! Persistent state for vir
//!
//! State lives in a cache scoped to a namespace derived from the state
//! version, so a future format can live alongside the current one.

use crate::config::Config;
use crate::errors::{Result, VirError};
use std::path::{Path, PathBuf};
use vir_cache::{new_cache, SharedStore};

/// Version of the state layout
pub const STATE_VERSION: &str = "v1.0.0";

/// Key holding the most recently indexed library root
pub const MUSIC_ROOT_KEY: &str = "musicRoot";

const SCOPE: &str = "vir/state";

/// Namespace prefix for the current state version, e.g. `v1-0-0-`
pub fn cache_key_prefix() -> String {
    format!("{}-", STATE_VERSION.replace('.', "-"))
}

/// Cache of vir state, scoped to the current state version
#[derive(Debug, Clone)]
pub struct StateCache {
    cache: SharedStore,
}

impl StateCache {
    /// Open the state cache behind a connection descriptor
    pub fn open(descriptor: &str) -> Result<Self> {
        let cache = new_cache(descriptor)
            .map_err(|source| VirError::CacheSetupFailed { scope: SCOPE, source })?;
        Ok(Self {
            cache: cache.with_prefix(&cache_key_prefix()),
        })
    }

    /// Open the state cache configured for this run
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(&config.cache_descriptor()?)
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.cache
            .get(key)
            .map_err(|source| Self::operation_failed("Get", key, source))
    }

    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.cache
            .set(key, value)
            .map_err(|source| Self::operation_failed("Set", key, source))
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.cache
            .delete(key)
            .map_err(|source| Self::operation_failed("Delete", key, source))
    }

    /// Record the library root being indexed
    pub fn set_music_root(&self, root: &Path) -> Result<()> {
        self.set(MUSIC_ROOT_KEY, root.to_string_lossy().as_bytes())
    }

    /// The library root recorded by the last rebuild, if any
    pub fn last_music_root(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .get(MUSIC_ROOT_KEY)?
            .map(|bytes| PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())))
    }

    fn operation_failed(op: &'static str, key: &str, source: vir_cache::CacheError) -> VirError {
        VirError::CacheOperationFailed {
            scope: SCOPE,
            op,
            key: key.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vir_cache::dir_descriptor;

    #[test]
    fn test_cache_key_prefix() {
        assert_eq!(cache_key_prefix(), "v1-0-0-");
    }

    #[test]
    fn test_music_root_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let state = StateCache::open(&dir_descriptor(temp_dir.path())).unwrap();

        assert_eq!(state.last_music_root().unwrap(), None);
        state.set_music_root(Path::new("/music/library")).unwrap();
        assert_eq!(
            state.last_music_root().unwrap(),
            Some(PathBuf::from("/music/library"))
        );
        assert!(temp_dir.path().join("v1-0-0-musicRoot").is_file());

        state.delete(MUSIC_ROOT_KEY).unwrap();
        assert_eq!(state.last_music_root().unwrap(), None);
    }

    #[test]
    fn test_setup_failure_is_scoped() {
        let err = StateCache::open("nope").unwrap_err();
        assert!(matches!(err, VirError::CacheSetupFailed { .. }));
        assert_eq!(err.scope(), "vir/state");
    }

    #[test]
    fn test_unsafe_key_is_scoped() {
        let temp_dir = TempDir::new().unwrap();
        let state = StateCache::open(&dir_descriptor(temp_dir.path())).unwrap();
        match state.set("a/b", b"x") {
            Err(VirError::CacheOperationFailed { op, key, source, .. }) => {
                assert_eq!(op, "Set");
                assert_eq!(key, "a/b");
                assert!(matches!(source, vir_cache::CacheError::UnsafeKey { .. }));
            }
            other => panic!("expected CacheOperationFailed, got {other:?}"),
        }
    }
}
