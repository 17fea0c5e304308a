//! Fallback for hosts without a supported display configuration API.

use crate::api::{ApplyMode, DisplayApi, ModeIndex};
use crate::device::DisplayDevice;
use crate::error::{Error, Result};
use crate::mode::DisplayMode;

/// The host OS display API. Every call fails on this platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeApi;

fn unsupported<T>() -> Result<T> {
    Err(Error::NotSupported(
        "display configuration is only available on Windows".into(),
    ))
}

impl DisplayApi for NativeApi {
    fn enum_device(&self, _index: u32) -> Result<Option<DisplayDevice>> {
        unsupported()
    }

    fn enum_mode(&self, _device: &str, _index: ModeIndex) -> Result<Option<DisplayMode>> {
        unsupported()
    }

    fn change_global(&self, _mode: &DisplayMode, _apply: ApplyMode) -> Result<i32> {
        unsupported()
    }

    fn change_device(&self, _device: &str, _mode: &DisplayMode, _apply: ApplyMode) -> Result<i32> {
        unsupported()
    }
}
