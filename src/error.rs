// Errors surfaced to the caller when a snapshot cannot be turned into a board

use thiserror::Error;

/// A snapshot that decoded but cannot describe a playable board
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Board dimensions must both be positive
    #[error("board dimensions {width}x{height} are not playable")]
    InvalidDimensions { width: i32, height: i32 },

    /// Every snake needs at least a head segment
    #[error("snake '{id}' has an empty body")]
    EmptyBody { id: String },
}
