//! Domain error types.
//!
//! These errors represent validation failures on user-supplied values.
//! They are distinct from upstream and IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid zone width: {0} (expected 0-100)")]
    InvalidWidth(i64),

    #[error("invalid zone length: {0} (expected 0-100)")]
    InvalidLength(i64),

    #[error("invalid zone position: {0} (expected 0-100)")]
    InvalidOffset(i64),

    #[error("invalid cost: must be a non-negative amount")]
    InvalidCost,

    #[error("invalid contact: must be 5 to 25 characters")]
    InvalidContact,
}
