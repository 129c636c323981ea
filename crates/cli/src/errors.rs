//! Error types for vir
//!
//! Every variant carries the scope it was raised in (e.g. `vir/index`), so
//! a message can be logged meaningfully without a backtrace.

use std::path::PathBuf;
use vir_cache::CacheError;

/// Result type alias for vir operations
pub type Result<T> = std::result::Result<T, VirError>;

#[derive(Debug, thiserror::Error)]
pub enum VirError {
    /// The home directory, and so the state directory, is unknown
    #[error("{scope}: could not find your home directory; this means vir can't configure itself")]
    UserLookupFailed { scope: &'static str },

    /// No music library root was given
    #[error("{scope}: no music library root given; pass --music-root or set VIR_MUSIC_ROOT")]
    MusicRootNotConfigured { scope: &'static str },

    #[error("{scope}: could not set up configuration cache: {source}")]
    CacheSetupFailed {
        scope: &'static str,
        #[source]
        source: CacheError,
    },

    #[error("{scope}: cache operation {op} for key {key} failed: {source}")]
    CacheOperationFailed {
        scope: &'static str,
        op: &'static str,
        key: String,
        #[source]
        source: CacheError,
    },

    #[error("{scope}: music library root dir does not exist: {}", path.display())]
    MusicLibraryRootDoesNotExist { scope: &'static str, path: PathBuf },

    #[error("{scope}: path exists but is not a dir: {}", path.display())]
    MusicLibraryRootIsNotDir { scope: &'static str, path: PathBuf },

    #[error("{scope}: encountered an error while walking the music library: {source}")]
    MusicLibraryWalk {
        scope: &'static str,
        #[source]
        source: walkdir::Error,
    },

    #[error("{scope}: encountered an error while loading id3 metadata for {}: {reason}", path.display())]
    TrackMetadataLoadFailed {
        scope: &'static str,
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<id3::Error>,
    },

    /// An I/O failure that is hard to predict or recover from
    #[error("{scope}: unexpected fatal error: {source}")]
    Fatal {
        scope: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl VirError {
    /// The layer that raised the error
    pub fn scope(&self) -> &'static str {
        match self {
            Self::UserLookupFailed { scope }
            | Self::MusicRootNotConfigured { scope }
            | Self::CacheSetupFailed { scope, .. }
            | Self::CacheOperationFailed { scope, .. }
            | Self::MusicLibraryRootDoesNotExist { scope, .. }
            | Self::MusicLibraryRootIsNotDir { scope, .. }
            | Self::MusicLibraryWalk { scope, .. }
            | Self::TrackMetadataLoadFailed { scope, .. }
            | Self::Fatal { scope, .. } => scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_scope() {
        let err = VirError::MusicLibraryRootDoesNotExist {
            scope: "vir/index",
            path: PathBuf::from("/nowhere"),
        };
        assert_eq!(err.scope(), "vir/index");
        assert_eq!(
            err.to_string(),
            "vir/index: music library root dir does not exist: /nowhere"
        );
    }

    #[test]
    fn test_cache_failures_keep_source() {
        use std::error::Error;

        let err = VirError::CacheOperationFailed {
            scope: "vir/state",
            op: "Get",
            key: "../x".to_string(),
            source: vir_cache::new_cache("ftp:host").unwrap_err(),
        };
        assert!(err.to_string().starts_with("vir/state: cache operation Get"));
        assert!(err.source().is_some());
    }
}
