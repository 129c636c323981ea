//! Error handling for the cache
//!
//! Construction failures (`InvalidDescriptor`, `UnknownBackendKind`, `Init`)
//! abort cache setup entirely. Operation failures (`UnsafeKey`,
//! `OperationFailed`) are scoped to a single call and leave the store usable.

mod recovery;
mod types;

pub use recovery::RecoveryHint;
pub use types::*;
