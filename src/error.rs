//! Error types for display enumeration and configuration.

use thiserror::Error;

/// Result type alias for dispctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or changing display settings.
///
/// Outcomes of a submitted change (including an unsupported mode or a result
/// code the OS documents nowhere) are not errors; see
/// [`ChangeOutcome`](crate::ChangeOutcome).
#[derive(Debug, Error)]
pub enum Error {
    /// The OS does not recognise the device name.
    #[error("display device not found: {0}")]
    DeviceNotFound(String),

    /// The device's current settings could not be read right before a change.
    #[error("display device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The device name cannot be passed to the OS (too long or contains NUL).
    #[error("invalid display device name: {0:?}")]
    InvalidDeviceName(String),

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),

    /// The requested feature is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),
}
