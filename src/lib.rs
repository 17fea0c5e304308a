//! # dispctl
//!
//! Enumerate display devices, inspect their modes, and change a device's
//! resolution or position.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dispctl::{current_mode, is_supported, list_devices, set_resolution};
//!
//! for device in list_devices()? {
//!     let mode = current_mode(&device)?;
//!     println!("{device}: {mode}");
//! }
//!
//! let device = r"\\.\DISPLAY1";
//! if is_supported(device, 1280, 720) {
//!     let report = set_resolution(device, 1280, 720)?;
//!     println!("{report}");
//! }
//! # Ok::<(), dispctl::Error>(())
//! ```
//!
//! ## Architecture
//!
//! Three components sit on top of the [`DisplayApi`] trait, which mirrors the
//! native entry points one to one:
//!
//! - [`DeviceCatalog`] walks the device list and each device's mode table.
//! - [`ModeNegotiator`] checks requested resolutions against the mode table and
//!   builds change payloads from the device's live current mode.
//! - [`ConfigurationApplier`] submits payloads and classifies the result code
//!   as a [`ChangeOutcome`].
//!
//! [`DisplayManager`] chains them for the common operations. The free
//! functions below run a manager against the host OS.
//!
//! Every call reads live OS state; nothing is cached between calls.

#![warn(missing_docs)]

pub mod api;
pub mod apply;
pub mod catalog;
pub mod device;
pub mod error;
pub mod manager;
pub mod mode;
pub mod negotiate;
pub mod outcome;

mod platform;
#[cfg(test)]
mod testing;

use std::collections::BTreeSet;

// Re-exports
pub use api::{ApplyMode, DisplayApi, ModeIndex};
pub use apply::ConfigurationApplier;
pub use catalog::{DeviceCatalog, Devices, Modes};
pub use device::{DisplayDevice, StateFlags};
pub use error::{Error, Result};
pub use manager::{DeviceSettings, DisplayManager};
pub use mode::{DisplayMode, Orientation, RawDescriptor};
pub use negotiate::ModeNegotiator;
pub use outcome::{Change, ChangeOutcome, ChangeReport};
pub use platform::NativeApi;

/// Distinct names of all display devices.
pub fn list_devices() -> Result<BTreeSet<String>> {
    DisplayManager::native().list_devices()
}

/// All display device records, in OS order.
pub fn devices() -> Result<Vec<DisplayDevice>> {
    DisplayManager::native().devices().collect()
}

/// Modes a display device supports.
pub fn modes(device: &str) -> Vec<DisplayMode> {
    DisplayManager::native().modes(device).collect()
}

/// The mode a display device is using.
pub fn current_mode(device: &str) -> Result<DisplayMode> {
    DisplayManager::native().current_mode(device)
}

/// Whether a display device lists a mode with this resolution.
pub fn is_supported(device: &str, width: u32, height: u32) -> bool {
    DisplayManager::native().is_supported(device, width, height)
}

/// Current settings of every display device that has any.
pub fn query_all() -> Result<Vec<DeviceSettings>> {
    DisplayManager::native().query_all()
}

/// Change a display device's resolution for the running session.
pub fn set_resolution(device: &str, width: u32, height: u32) -> Result<ChangeReport> {
    DisplayManager::native().set_resolution(device, width, height, ApplyMode::Dynamic)
}

/// Move a display device for the running session.
pub fn set_position(device: &str, x: i32, y: i32) -> Result<ChangeReport> {
    DisplayManager::native().set_position(device, x, y, ApplyMode::Dynamic)
}
