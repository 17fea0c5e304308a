//! Windows backend built on `EnumDisplayDevicesW`, `EnumDisplaySettingsW`,
//! `ChangeDisplaySettingsW` and `ChangeDisplaySettingsExW`.

mod devmode;
mod display;

use crate::api::{ApplyMode, DisplayApi, ModeIndex};
use crate::device::DisplayDevice;
use crate::error::Result;
use crate::mode::DisplayMode;

/// The host OS display API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeApi;

impl DisplayApi for NativeApi {
    fn enum_device(&self, index: u32) -> Result<Option<DisplayDevice>> {
        display::enum_device(index)
    }

    fn enum_mode(&self, device: &str, index: ModeIndex) -> Result<Option<DisplayMode>> {
        display::enum_mode(device, index)
    }

    fn change_global(&self, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        display::change_global(mode, apply)
    }

    fn change_device(&self, device: &str, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        display::change_device(device, mode, apply)
    }
}
