//! Caller-level display operations.

use crate::api::{ApplyMode, DisplayApi};
use crate::apply::ConfigurationApplier;
use crate::catalog::{DeviceCatalog, Devices, Modes};
use crate::error::{Error, Result};
use crate::mode::DisplayMode;
use crate::negotiate::ModeNegotiator;
use crate::outcome::{Change, ChangeOutcome, ChangeReport};
use crate::platform::NativeApi;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A device name together with the mode it is using.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceSettings {
    /// Device name.
    pub device: String,
    /// Current mode.
    pub mode: DisplayMode,
}

/// Runs catalog, negotiation and apply steps against one display API.
///
/// # Example
///
/// ```no_run
/// use dispctl::{ApplyMode, DisplayManager};
///
/// let manager = DisplayManager::native();
/// for device in manager.list_devices()? {
///     println!("{device}");
/// }
///
/// let report = manager.set_resolution(r"\\.\DISPLAY1", 1920, 1080, ApplyMode::Dynamic)?;
/// println!("{report}");
/// # Ok::<(), dispctl::Error>(())
/// ```
pub struct DisplayManager<A = NativeApi> {
    api: A,
}

impl DisplayManager<NativeApi> {
    /// A manager backed by the host OS.
    pub fn native() -> Self {
        Self::new(NativeApi)
    }
}

impl Default for DisplayManager<NativeApi> {
    fn default() -> Self {
        Self::native()
    }
}

impl<A: DisplayApi> DisplayManager<A> {
    /// Manager over a custom backend.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Device and mode enumeration.
    pub fn catalog(&self) -> DeviceCatalog<'_, A> {
        DeviceCatalog::new(&self.api)
    }

    /// Support checks and change payloads.
    pub fn negotiator(&self) -> ModeNegotiator<'_, A> {
        ModeNegotiator::new(&self.api)
    }

    /// Change submission.
    pub fn applier(&self) -> ConfigurationApplier<'_, A> {
        ConfigurationApplier::new(&self.api)
    }

    /// Distinct device names.
    pub fn list_devices(&self) -> Result<BTreeSet<String>> {
        self.catalog().list_devices()
    }

    /// Device records, in OS order.
    pub fn devices(&self) -> Devices<'_, A> {
        self.catalog().devices()
    }

    /// Modes of one device.
    pub fn modes(&self, device: &str) -> Modes<'_, A> {
        self.catalog().modes(device)
    }

    /// The mode `device` is using right now.
    pub fn current_mode(&self, device: &str) -> Result<DisplayMode> {
        self.catalog().current_mode(device)
    }

    /// Whether `device` lists `width` x `height`.
    pub fn is_supported(&self, device: &str, width: u32, height: u32) -> bool {
        self.negotiator().is_supported(device, width, height)
    }

    /// Current settings of one device.
    pub fn query(&self, device: &str) -> Result<DeviceSettings> {
        let mode = self.current_mode(device)?;
        Ok(DeviceSettings {
            device: device.to_string(),
            mode,
        })
    }

    /// Current settings of every device that has any.
    ///
    /// Devices the OS lists but cannot report settings for (adapters not
    /// attached to the desktop, for instance) are skipped.
    pub fn query_all(&self) -> Result<Vec<DeviceSettings>> {
        let mut settings = Vec::new();
        for device in self.devices() {
            let device = device?;
            match self.query(&device.name) {
                Ok(entry) => settings.push(entry),
                Err(Error::DeviceNotFound(name)) => {
                    log::debug!("Skipping {name}: no current settings");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(settings)
    }

    /// Change the resolution of `device`.
    ///
    /// A resolution the device does not list yields a report with
    /// [`ChangeOutcome::ModeNotSupported`] and nothing is submitted.
    pub fn set_resolution(
        &self,
        device: &str,
        width: u32,
        height: u32,
        apply: ApplyMode,
    ) -> Result<ChangeReport> {
        let change = Change::Resolution { width, height };
        let negotiator = self.negotiator();
        if !negotiator.is_supported(device, width, height) {
            log::info!("{width}x{height} is not among the modes of {device}");
            return Ok(ChangeReport::new(
                device,
                change,
                ChangeOutcome::ModeNotSupported,
            ));
        }

        let mode = negotiator.build_resolution_change(device, width, height)?;
        let outcome = self.applier().apply_resolution(device, &mode, apply)?;
        Ok(ChangeReport::new(device, change, outcome))
    }

    /// Move `device` so its top-left corner is at (`x`, `y`).
    pub fn set_position(&self, device: &str, x: i32, y: i32, apply: ApplyMode) -> Result<ChangeReport> {
        let mode = self.negotiator().build_position_change(device, x, y)?;
        let outcome = self.applier().apply_position(device, &mode, apply)?;
        Ok(ChangeReport::new(device, Change::Position { x, y }, outcome))
    }
}
