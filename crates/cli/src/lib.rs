//! vir: manage your music library
//!
//! The command layer over [`vir_cache`]: it walks a music library, reads
//! ID3 tags, and keeps its own state in a versioned cache namespace.

pub mod commands;
pub mod config;
pub mod errors;
pub mod index;
pub mod logging;
pub mod state;
pub mod track;

pub use commands::Commands;
pub use config::Config;
pub use errors::{Result, VirError};
pub use index::{Index, RebuildReport};
pub use state::StateCache;
pub use track::{Metadata, Track};
