//! Error types for the animation engine.

use thiserror::Error;

use crate::group::GroupId;

/// Result type for animation operations.
pub type Result<T> = std::result::Result<T, AnimError>;

/// Errors surfaced by the animation engine.
///
/// Every variant is a caller or configuration mistake; nothing here is
/// retried or recovered internally.
#[derive(Error, Debug)]
pub enum AnimError {
    /// An element or group could not be identified.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Easing family/mode pair outside the curve table.
    #[error("unsupported easing combination: function `{function}`, mode `{mode}`")]
    UnsupportedEasing { function: String, mode: String },

    /// No group is registered under this handle.
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    /// Wire encoding failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
