//! Classification of display change results.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a submitted display change, decoded from the OS result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeOutcome {
    /// The change took effect (code 0).
    Successful,
    /// The computer must be restarted for the change to take effect (code 1).
    RequiresRestart,
    /// The driver failed the requested mode (code -1).
    Failed,
    /// The mode is not supported (code -2).
    ModeNotSupported,
    /// The change could not be written to the registry (code -3).
    NotPersisted,
    /// The OS returned a code outside the table above.
    Unrecognized(i32),
}

impl ChangeOutcome {
    /// Decode an OS result code.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ChangeOutcome::Successful,
            1 => ChangeOutcome::RequiresRestart,
            -1 => ChangeOutcome::Failed,
            -2 => ChangeOutcome::ModeNotSupported,
            -3 => ChangeOutcome::NotPersisted,
            other => ChangeOutcome::Unrecognized(other),
        }
    }

    /// The OS result code.
    pub fn code(self) -> i32 {
        match self {
            ChangeOutcome::Successful => 0,
            ChangeOutcome::RequiresRestart => 1,
            ChangeOutcome::Failed => -1,
            ChangeOutcome::ModeNotSupported => -2,
            ChangeOutcome::NotPersisted => -3,
            ChangeOutcome::Unrecognized(code) => code,
        }
    }

    /// Whether the change was applied as requested.
    pub fn is_success(self) -> bool {
        self == ChangeOutcome::Successful
    }

    /// Whether the change took effect only partially.
    pub fn is_partial(self) -> bool {
        matches!(
            self,
            ChangeOutcome::RequiresRestart | ChangeOutcome::NotPersisted
        )
    }
}

impl fmt::Display for ChangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeOutcome::Successful => f.write_str("successful"),
            ChangeOutcome::RequiresRestart => f.write_str("restart required"),
            ChangeOutcome::Failed => f.write_str("failed"),
            ChangeOutcome::ModeNotSupported => f.write_str("mode not supported"),
            ChangeOutcome::NotPersisted => f.write_str("not persisted"),
            ChangeOutcome::Unrecognized(code) => write!(f, "unrecognized result code {code}"),
        }
    }
}

/// What a change request asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Change {
    /// New width and height.
    Resolution {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// New top-left corner in virtual-desktop coordinates.
    Position {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
    },
}

/// Caller-facing summary of one change request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChangeReport {
    /// Device the request targeted.
    pub device: String,
    /// The requested change.
    pub change: Change,
    /// How the request ended.
    pub outcome: ChangeOutcome,
}

impl ChangeReport {
    /// Record the outcome of `change` on `device`.
    pub fn new(device: impl Into<String>, change: Change, outcome: ChangeOutcome) -> Self {
        Self {
            device: device.into(),
            change,
            outcome,
        }
    }
}

impl fmt::Display for ChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device = &self.device;
        match (self.outcome, self.change) {
            (ChangeOutcome::Successful, Change::Resolution { width, height }) => {
                write!(f, "Resolution changed to {width}x{height} for device {device}.")
            }
            (ChangeOutcome::Successful, Change::Position { x, y }) => {
                write!(f, "Position changed to X={x}, Y={y} for device {device}.")
            }
            (ChangeOutcome::RequiresRestart, _) => write!(
                f,
                "The computer needs to be restarted for the changes on device {device} to take effect."
            ),
            (ChangeOutcome::Failed, _) => {
                write!(f, "Failed to change the display settings for device {device}.")
            }
            (ChangeOutcome::ModeNotSupported, Change::Resolution { width, height }) => {
                write!(f, "Resolution {width}x{height} is not supported on device {device}.")
            }
            (ChangeOutcome::ModeNotSupported, Change::Position { .. }) => {
                write!(f, "The graphics mode is not supported for device {device}.")
            }
            (ChangeOutcome::NotPersisted, _) => {
                write!(f, "Unable to write settings to the registry for device {device}.")
            }
            (ChangeOutcome::Unrecognized(code), _) => write!(
                f,
                "Unrecognized result code {code} while changing the display settings for device {device}."
            ),
        }
    }
}
