//! Recovery utilities for cache errors

use super::types::CacheError;
use std::io::ErrorKind;
use std::path::PathBuf;

/// What a caller can do about a failed cache call.
///
/// The cache never retries on its own; this only classifies the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryHint {
    /// Correct the connection descriptor
    FixDescriptor,
    /// Use a registered backend kind
    UseKnownBackend,
    /// Check permissions or free space for a path
    CheckPermissions { path: PathBuf },
    /// Pass a key made of ASCII letters, digits, `-` and `.`
    SanitizeKey,
    /// The operation may succeed if repeated
    Retry,
    /// Clear the damaged entry and write it again
    ClearAndRetry,
    /// No automated recovery possible
    Manual,
}

impl CacheError {
    /// Get the recovery hint for this error
    #[must_use]
    pub fn recovery_hint(&self) -> RecoveryHint {
        match self {
            Self::InvalidDescriptor { .. } => RecoveryHint::FixDescriptor,
            Self::UnknownBackendKind { .. } => RecoveryHint::UseKnownBackend,
            Self::Init { path, .. } => RecoveryHint::CheckPermissions { path: path.clone() },
            Self::UnsafeKey { .. } => RecoveryHint::SanitizeKey,
            Self::OperationFailed { source, .. } => match source.kind() {
                ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                    RecoveryHint::Retry
                }
                ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
                    RecoveryHint::ClearAndRetry
                }
                _ => RecoveryHint::Manual,
            },
        }
    }

    /// Check if this error prevented a store from being constructed
    #[must_use]
    pub const fn is_construction_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidDescriptor { .. } | Self::UnknownBackendKind { .. } | Self::Init { .. }
        )
    }

    /// Check if this error is transient and can be retried by the caller
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self.recovery_hint(), RecoveryHint::Retry)
    }
}
