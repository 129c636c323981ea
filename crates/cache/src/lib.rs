//! Persistent key/value cache for vir
//!
//! This crate stores opaque byte values under sanitized string keys in a
//! backend chosen by a connection descriptor:
//! - `dir:<path>` stores one file per key under `<path>`
//! - `?gzip=1` compresses every value transparently
//! - prefixed views give separate namespaces over one store and one lock
//!
//! ```no_run
//! use vir_cache::new_cache;
//!
//! let cache = new_cache("dir:/home/me/.vir")?;
//! let state = cache.with_prefix("v1-0-0-");
//! state.set("musicRoot", b"/music")?;
//! assert_eq!(state.get("musicRoot")?, Some(b"/music".to_vec()));
//! # Ok::<(), vir_cache::CacheError>(())
//! ```

pub mod descriptor;
pub mod errors;
pub mod keys;
pub mod prefixed;
pub mod registry;
pub mod storage;
pub mod traits;

pub use descriptor::{dir_descriptor, dir_descriptor_with_gzip, Descriptor};
pub use errors::{CacheError, Error, Operation, RecoveryHint, Result};
pub use keys::{is_safe_key, sanitize_base_name};
pub use prefixed::PrefixedStore;
pub use registry::{new_cache, open_cache, BackendKind};
pub use storage::{Compression, FileStore};
pub use traits::{SharedStore, Store};
