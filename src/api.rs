//! The native display API surface the rest of the crate is built on.

use crate::device::DisplayDevice;
use crate::error::Result;
use crate::mode::DisplayMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which mode to ask a device for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeIndex {
    /// The n-th entry of the device's mode table.
    Ordinal(u32),
    /// The mode the device is using right now.
    Current,
}

/// How a submitted change should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ApplyMode {
    /// Change the running configuration only.
    #[default]
    Dynamic,
    /// Change the running configuration and store it for the current user.
    Persistent,
    /// Ask the OS whether the change could be made, without making it.
    Test,
}

/// The four native entry points: enumerate devices, enumerate modes, change
/// the global configuration, change one device's configuration.
///
/// `Ok(None)` from an enumeration call means the index is past the end of the
/// list. `Err` means the call could not be made at all.
///
/// Implementations must build a fresh OS structure for every call.
pub trait DisplayApi {
    /// Return the device at `index` of the OS device list.
    fn enum_device(&self, index: u32) -> Result<Option<DisplayDevice>>;

    /// Return a mode of `device`.
    fn enum_mode(&self, device: &str, index: ModeIndex) -> Result<Option<DisplayMode>>;

    /// Submit `mode` as the new global configuration and return the raw
    /// result code.
    fn change_global(&self, mode: &DisplayMode, apply: ApplyMode) -> Result<i32>;

    /// Submit `mode` for `device` and return the raw result code.
    fn change_device(&self, device: &str, mode: &DisplayMode, apply: ApplyMode) -> Result<i32>;
}

impl<A: DisplayApi + ?Sized> DisplayApi for &A {
    fn enum_device(&self, index: u32) -> Result<Option<DisplayDevice>> {
        (**self).enum_device(index)
    }

    fn enum_mode(&self, device: &str, index: ModeIndex) -> Result<Option<DisplayMode>> {
        (**self).enum_mode(device, index)
    }

    fn change_global(&self, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        (**self).change_global(mode, apply)
    }

    fn change_device(&self, device: &str, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        (**self).change_device(device, mode, apply)
    }
}

impl<A: DisplayApi + ?Sized> DisplayApi for Box<A> {
    fn enum_device(&self, index: u32) -> Result<Option<DisplayDevice>> {
        (**self).enum_device(index)
    }

    fn enum_mode(&self, device: &str, index: ModeIndex) -> Result<Option<DisplayMode>> {
        (**self).enum_mode(device, index)
    }

    fn change_global(&self, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        (**self).change_global(mode, apply)
    }

    fn change_device(&self, device: &str, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        (**self).change_device(device, mode, apply)
    }
}
