//! Directory-backed store
//!
//! One regular file per key directly under the root directory, named after
//! the key plus the compression suffix. There is no index; listing the
//! directory lists the keys.
//!
//! A single reader/writer lock guards the whole directory. Reads take it
//! shared, writes and deletes take it exclusive, and every prefixed view
//! derived from the store reuses the same lock.

use super::compression::Compression;
use crate::errors::{CacheError, Operation, Result};
use crate::keys::is_safe_key;
use crate::prefixed::PrefixedStore;
use crate::traits::{SharedStore, Store};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Store rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<FileStoreInner>,
}

#[derive(Debug)]
struct FileStoreInner {
    root: PathBuf,
    compression: Compression,
    lock: RwLock<()>,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory (owner-only)
    /// if it does not exist. `options` are the descriptor options; `gzip`
    /// enables compression for the lifetime of the store.
    pub fn open(root: impl Into<PathBuf>, options: &HashMap<String, String>) -> Result<Self> {
        let root = root.into();
        init_root_dir(&root)?;

        let compression = Compression::from_options(options);
        tracing::debug!(
            root = %root.display(),
            gzip = compression.is_enabled(),
            "opened file cache"
        );

        Ok(Self {
            inner: Arc::new(FileStoreInner {
                root,
                compression,
                lock: RwLock::new(()),
            }),
        })
    }

    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    pub fn compression(&self) -> Compression {
        self.inner.compression
    }

    /// Map a key to its file, refusing keys that are not safe base names
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if !is_safe_key(key) {
            tracing::debug!(key, "rejected unsafe cache key");
            return Err(CacheError::unsafe_key(key));
        }

        let mut name = OsString::from(key);
        name.push(self.inner.compression.file_suffix());
        Ok(self.inner.root.join(name))
    }

    fn failed(op: Operation, key: &str, source: std::io::Error) -> CacheError {
        tracing::debug!(key, %op, error = %source, "cache operation failed");
        CacheError::operation(op, key, source)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        let _guard = self.inner.lock.read();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(key, "cache miss");
                return Ok(None);
            }
            Err(e) => return Err(Self::failed(Operation::Read, key, e)),
        };

        let value = self
            .inner
            .compression
            .read_all(file)
            .map_err(|e| Self::failed(Operation::Read, key, e))?;

        tracing::trace!(key, bytes = value.len(), "cache hit");
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key)?;
        let _guard = self.inner.lock.write();

        let file = File::create(&path).map_err(|e| Self::failed(Operation::Write, key, e))?;
        self.inner
            .compression
            .write_all(file, value)
            .map_err(|e| Self::failed(Operation::Write, key, e))?;

        tracing::trace!(key, bytes = value.len(), "cache write");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let _guard = self.inner.lock.write();

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::trace!(key, "cache delete");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(key, "cache delete of missing key");
                Ok(())
            }
            Err(e) => Err(Self::failed(Operation::Delete, key, e)),
        }
    }

    fn with_prefix(&self, prefix: &str) -> SharedStore {
        Arc::new(PrefixedStore::new(Arc::new(self.clone()), prefix))
    }
}

/// Make sure `root` is a usable directory, creating it if missing
fn init_root_dir(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(CacheError::init(root, "cache directory path is empty"));
    }

    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CacheError::init(root, "exists but is not a directory")),
        Err(e) if e.kind() == ErrorKind::NotFound => create_private_dir(root)
            .map_err(|e| CacheError::init_io(root, "could not create directory", e)),
        Err(e) => Err(CacheError::init_io(root, "could not stat directory", e)),
    }
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}
