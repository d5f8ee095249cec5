//! Error types for the memory storage
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Storage Error Enum ==
/// Errors surfaced by storage lookups.
///
/// Only reads can fail. Writes, removals and sweeps treat absent keys as
/// successful no-ops.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// No capsule is stored for the key
    #[error("Object not found")]
    NotFound,

    /// The stored payload is not of the requested value type
    #[error("Stored object does not match the requested type")]
    TypeMismatch,
}

// == Result Type Alias ==
/// Convenience Result type for storage lookups.
pub type Result<T> = std::result::Result<T, StorageError>;
