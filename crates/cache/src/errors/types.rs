//! Core error types for the cache

use std::fmt;
use std::path::PathBuf;

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Re-export CacheError as Error for convenience
pub use CacheError as Error;

/// The store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Delete,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for every cache layer
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The connection descriptor or its query string is malformed
    #[error("invalid cache descriptor '{descriptor}': {reason}")]
    InvalidDescriptor {
        descriptor: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No backend is registered for the descriptor's kind
    #[error("unknown cache backend kind '{kind}' (known kinds: {known})")]
    UnknownBackendKind { kind: String, known: String },

    /// Backend setup failed
    #[error("could not initialize cache at '{}': {reason}", path.display())]
    Init {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The key, after prefixing, does not map to a single safe file name
    #[error("'{key}' is an unsafe cache key")]
    UnsafeKey { key: String },

    /// An I/O or compression failure during one operation
    #[error("cache {op} on '{key}' failed: {source}")]
    OperationFailed {
        op: Operation,
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    pub(crate) fn invalid_descriptor(descriptor: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn init(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Init {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn init_io(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Init {
            path: path.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    pub(crate) fn unsafe_key(key: impl Into<String>) -> Self {
        Self::UnsafeKey { key: key.into() }
    }

    pub(crate) fn operation(op: Operation, key: impl Into<String>, source: std::io::Error) -> Self {
        Self::OperationFailed {
            op,
            key: key.into(),
            source,
        }
    }

    /// The key involved, for operation-level errors
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnsafeKey { key } | Self::OperationFailed { key, .. } => Some(key),
            _ => None,
        }
    }
}
