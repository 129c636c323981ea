//! Storage backends
//!
//! Each backend implements [`crate::Store`] and is registered by kind in
//! [`crate::registry`].

mod compression;
mod file_store;

pub use compression::{Compression, GZIP_OPTION, GZIP_SUFFIX};
pub use file_store::FileStore;
