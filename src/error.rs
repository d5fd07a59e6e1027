//! Error types for picture-buffer operations.

use thiserror::Error;

/// Result type for picture-buffer operations.
pub type Result<T> = std::result::Result<T, PictureError>;

/// Errors that can occur while building or transforming a picture buffer.
///
/// Dimension and format mismatches between buffers are caller bugs, not
/// runtime conditions; those surface as panics at the operation's contract
/// asserts rather than as variants here.
#[derive(Debug, Error)]
pub enum PictureError {
    /// Plane or scratch storage could not be allocated.
    ///
    /// Creation is all-or-nothing: the partially built buffer is dropped and
    /// no usable state remains.
    #[error("Plane allocation failed: {bytes} bytes requested")]
    Allocation { bytes: usize },

    /// I/O error while writing a debug dump.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
