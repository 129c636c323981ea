//! Backend registry and cache factory
//!
//! Backends are a closed set: adding one means adding a [`BackendKind`]
//! variant and its constructor. Callers only ever see [`SharedStore`].

use crate::descriptor::Descriptor;
use crate::errors::{CacheError, Result};
use crate::storage::FileStore;
use crate::traits::SharedStore;
use std::fmt;
use std::sync::Arc;

/// Builds a store from a parsed descriptor
pub type Constructor = fn(&Descriptor) -> Result<SharedStore>;

/// Registered backend kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Directory of one file per key
    Dir,
}

impl BackendKind {
    pub const ALL: &'static [BackendKind] = &[BackendKind::Dir];

    /// Name used in descriptors
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Dir => "dir",
        }
    }

    /// Case-insensitive lookup by descriptor kind
    pub fn lookup(kind: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|backend| kind.eq_ignore_ascii_case(backend.name()))
    }

    pub fn constructor(self) -> Constructor {
        match self {
            BackendKind::Dir => open_dir_store,
        }
    }

    fn known_names() -> String {
        Self::ALL
            .iter()
            .map(|backend| backend.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| CacheError::UnknownBackendKind {
            kind: s.to_string(),
            known: Self::known_names(),
        })
    }
}

fn open_dir_store(descriptor: &Descriptor) -> Result<SharedStore> {
    let store = FileStore::open(descriptor.location(), descriptor.options())?;
    Ok(Arc::new(store))
}

/// Create a cache from a connection descriptor.
///
/// For example, file-based with compression:
///
/// ```no_run
/// let cache = vir_cache::new_cache("dir:/home/me/.vir?gzip=1")?;
/// cache.set("musicRoot", b"/music")?;
/// # Ok::<(), vir_cache::CacheError>(())
/// ```
pub fn new_cache(descriptor: &str) -> Result<SharedStore> {
    let descriptor = Descriptor::parse(descriptor)?;
    open_cache(&descriptor)
}

/// Create a cache from an already parsed descriptor
pub fn open_cache(descriptor: &Descriptor) -> Result<SharedStore> {
    let kind: BackendKind = descriptor.kind().parse()?;
    tracing::debug!(%kind, location = descriptor.location(), "opening cache backend");
    (kind.constructor())(descriptor)
}
