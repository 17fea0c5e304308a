//! Display device identity records.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a device name, in UTF-16 units, excluding the terminator.
pub const MAX_DEVICE_NAME_LEN: usize = 31;

bitflags! {
    /// Device state bits as reported by the OS device enumeration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct StateFlags: u32 {
        /// The device is part of the desktop.
        const ATTACHED_TO_DESKTOP = 0x0000_0001;
        /// The adapter drives more than one output.
        const MULTI_DRIVER = 0x0000_0002;
        /// The primary desktop is on this device.
        const PRIMARY_DEVICE = 0x0000_0004;
        /// A pseudo device used to mirror application drawing.
        const MIRRORING_DRIVER = 0x0000_0008;
        /// The device is VGA compatible.
        const VGA_COMPATIBLE = 0x0000_0010;
        /// The device is removable; it cannot be the primary display.
        const REMOVABLE = 0x0000_0020;
        /// The driver is an accessibility mirror driver.
        const ACC_DRIVER = 0x0000_0040;
        /// The OS hides modes the attached monitor cannot show.
        const MODES_PRUNED = 0x0800_0000;
        /// The device belongs to a remote session.
        const REMOTE = 0x0400_0000;
        /// The device is disconnected.
        const DISCONNECT = 0x0200_0000;

        // Bits we do not name still round-trip.
        const _ = !0;
    }
}

/// One OS-level display adapter or output.
///
/// Records are created fresh by every enumeration pass and are not cached.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayDevice {
    /// Stable OS identifier, e.g. `\\.\DISPLAY1`.
    pub name: String,
    /// Human readable adapter description.
    pub description: String,
    /// Device state bits.
    pub state_flags: StateFlags,
    /// Plug and play device ID.
    pub device_id: String,
    /// Registry key of the device.
    pub device_key: String,
}

impl DisplayDevice {
    /// Create a record with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            state_flags: StateFlags::empty(),
            device_id: String::new(),
            device_key: String::new(),
        }
    }

    /// Set the adapter description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the state bits.
    pub fn with_state_flags(mut self, flags: StateFlags) -> Self {
        self.state_flags = flags;
        self
    }

    /// Whether the device is part of the desktop.
    pub fn is_attached(&self) -> bool {
        self.state_flags.contains(StateFlags::ATTACHED_TO_DESKTOP)
    }

    /// Whether the primary desktop is on this device.
    pub fn is_primary(&self) -> bool {
        self.state_flags.contains(StateFlags::PRIMARY_DEVICE)
    }

    /// Whether this is a mirroring pseudo device.
    pub fn is_mirroring(&self) -> bool {
        self.state_flags.contains(StateFlags::MIRRORING_DRIVER)
    }

    /// Whether the device is removable.
    pub fn is_removable(&self) -> bool {
        self.state_flags.contains(StateFlags::REMOVABLE)
    }
}

/// Check that a device name fits the OS name field and has no interior NUL.
pub(crate) fn validate_name(name: &str) -> bool {
    !name.contains('\0') && name.encode_utf16().count() <= MAX_DEVICE_NAME_LEN
}
