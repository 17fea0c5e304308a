//! Submitting display changes to the OS.

use crate::api::{ApplyMode, DisplayApi, ModeIndex};
use crate::error::{Error, Result};
use crate::mode::DisplayMode;
use crate::outcome::ChangeOutcome;

/// Submits prepared modes and classifies the OS result code.
///
/// Nothing is retried. A `RequiresRestart` or `NotPersisted` outcome is
/// returned to the caller like any other.
pub struct ConfigurationApplier<'a, A: ?Sized> {
    api: &'a A,
}

impl<A: ?Sized> Clone for ConfigurationApplier<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for ConfigurationApplier<'_, A> {}

impl<'a, A: DisplayApi + ?Sized> ConfigurationApplier<'a, A> {
    /// Applier submitting through `api`.
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Submit a resolution change through the global entry point.
    ///
    /// The global entry point does not name a device; `device` is only used
    /// for logging.
    pub fn apply_resolution(
        &self,
        device: &str,
        mode: &DisplayMode,
        apply: ApplyMode,
    ) -> Result<ChangeOutcome> {
        log::debug!(
            "Submitting {}x{} for {device} ({apply:?})",
            mode.width,
            mode.height
        );
        let code = self.api.change_global(mode, apply)?;
        Ok(classify(device, code))
    }

    /// Submit a position change through the per-device entry point.
    ///
    /// The device's current settings are read first; if that fails the change
    /// is not attempted and [`Error::DeviceUnavailable`] is returned.
    pub fn apply_position(
        &self,
        device: &str,
        mode: &DisplayMode,
        apply: ApplyMode,
    ) -> Result<ChangeOutcome> {
        match self.api.enum_mode(device, ModeIndex::Current) {
            Ok(Some(_)) => {}
            Ok(None) => return Err(Error::DeviceUnavailable(device.to_string())),
            Err(err) => {
                log::debug!("Readiness check for {device} failed: {err}");
                return Err(Error::DeviceUnavailable(device.to_string()));
            }
        }

        log::debug!(
            "Submitting position ({}, {}) for {device} ({apply:?})",
            mode.position_x,
            mode.position_y
        );
        let code = self.api.change_device(device, mode, apply)?;
        Ok(classify(device, code))
    }
}

fn classify(device: &str, code: i32) -> ChangeOutcome {
    let outcome = ChangeOutcome::from_code(code);
    match outcome {
        ChangeOutcome::Unrecognized(code) => {
            log::warn!("Display change for {device} returned unrecognized code {code}")
        }
        outcome => log::debug!("Display change for {device}: {outcome}"),
    }
    outcome
}
