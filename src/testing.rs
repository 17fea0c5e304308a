//! In-memory display API for unit tests.

use crate::api::{ApplyMode, DisplayApi, ModeIndex};
use crate::device::{DisplayDevice, StateFlags, validate_name};
use crate::error::{Error, Result};
use crate::mode::{DisplayMode, Orientation, RawDescriptor};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// One call to a change entry point.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Submission {
    /// `None` for the global entry point.
    pub device: Option<String>,
    pub mode: DisplayMode,
    pub apply: ApplyMode,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    devices: Vec<DisplayDevice>,
    modes: HashMap<String, Vec<DisplayMode>>,
    current: RefCell<HashMap<String, DisplayMode>>,
    fail_mode_at: HashMap<String, u32>,
    result_code: Cell<i32>,
    pub mode_calls: Cell<u32>,
    pub submissions: RefCell<Vec<Submission>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device without a current mode and without modes.
    pub fn with_device(mut self, device: DisplayDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Add a device with a current mode and a mode table.
    pub fn with_display(
        mut self,
        device: DisplayDevice,
        current: DisplayMode,
        modes: Vec<DisplayMode>,
    ) -> Self {
        self.current
            .get_mut()
            .insert(device.name.clone(), current);
        self.modes.insert(device.name.clone(), modes);
        self.devices.push(device);
        self
    }

    /// Make the ordinal mode query at `index` for `device` fail.
    pub fn failing_mode_at(mut self, device: &str, index: u32) -> Self {
        self.fail_mode_at.insert(device.to_string(), index);
        self
    }

    /// Result code returned by both change entry points.
    pub fn returning(self, code: i32) -> Self {
        self.result_code.set(code);
        self
    }

    /// Simulate the device dropping off the desktop.
    pub fn detach(&self, device: &str) {
        self.current.borrow_mut().remove(device);
    }
}

impl DisplayApi for FakeApi {
    fn enum_device(&self, index: u32) -> Result<Option<DisplayDevice>> {
        Ok(self.devices.get(index as usize).cloned())
    }

    fn enum_mode(&self, device: &str, index: ModeIndex) -> Result<Option<DisplayMode>> {
        if !validate_name(device) {
            return Err(Error::InvalidDeviceName(device.to_string()));
        }
        match index {
            ModeIndex::Current => Ok(self.current.borrow().get(device).cloned()),
            ModeIndex::Ordinal(n) => {
                self.mode_calls.set(self.mode_calls.get() + 1);
                if self.fail_mode_at.get(device) == Some(&n) {
                    return Err(Error::Platform(format!("mode {n} of {device} unreadable")));
                }
                Ok(self
                    .modes
                    .get(device)
                    .and_then(|modes| modes.get(n as usize))
                    .cloned())
            }
        }
    }

    fn change_global(&self, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        self.submissions.borrow_mut().push(Submission {
            device: None,
            mode: mode.clone(),
            apply,
        });
        Ok(self.result_code.get())
    }

    fn change_device(&self, device: &str, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
        self.submissions.borrow_mut().push(Submission {
            device: Some(device.to_string()),
            mode: mode.clone(),
            apply,
        });
        Ok(self.result_code.get())
    }
}

/// A mode as the OS would hand it out, with a non-empty raw descriptor.
pub(crate) fn os_mode(width: u32, height: u32, hz: u32) -> DisplayMode {
    let mut raw = vec![0xA5; 16];
    raw.extend_from_slice(&width.to_le_bytes());
    raw.extend_from_slice(&height.to_le_bytes());
    DisplayMode::new(width, height)
        .with_bits_per_pixel(32)
        .with_refresh_hz(hz)
        .with_raw(RawDescriptor::new(raw))
}

/// `DISPLAY1`: primary, 1920x1080 at (0, 0), supporting 1920x1080 (60 and
/// 144 Hz), 1280x720 and 1024x768.
///
/// `DISPLAY2`: attached, 1280x1024 rotated, at (1920, 0).
pub(crate) fn two_displays() -> FakeApi {
    let primary = DisplayDevice::new("DISPLAY1")
        .with_description("Fake Adapter")
        .with_state_flags(StateFlags::ATTACHED_TO_DESKTOP | StateFlags::PRIMARY_DEVICE);
    let secondary = DisplayDevice::new("DISPLAY2")
        .with_description("Fake Adapter")
        .with_state_flags(StateFlags::ATTACHED_TO_DESKTOP);

    FakeApi::new()
        .with_display(
            primary,
            os_mode(1920, 1080, 60),
            vec![
                os_mode(1024, 768, 60),
                os_mode(1280, 720, 60),
                os_mode(1920, 1080, 60),
                os_mode(1920, 1080, 144),
            ],
        )
        .with_display(
            secondary,
            os_mode(1280, 1024, 75)
                .with_position(1920, 0)
                .with_orientation(Orientation::Rotated90),
            vec![os_mode(1280, 1024, 75), os_mode(1024, 768, 75)],
        )
}
