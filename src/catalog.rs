//! Device and mode discovery.
//!
//! The OS hands out devices and modes one index at a time and signals the end
//! of the list by failing the call. [`Devices`] and [`Modes`] turn that into
//! ordinary iterators: lazy, finite, and restarted from index 0 by every call
//! that creates one.

use crate::api::{DisplayApi, ModeIndex};
use crate::device::DisplayDevice;
use crate::error::{Error, Result};
use crate::mode::DisplayMode;
use std::collections::BTreeSet;
use std::iter::FusedIterator;

/// Enumerates display devices and their modes.
pub struct DeviceCatalog<'a, A: ?Sized> {
    api: &'a A,
}

impl<A: ?Sized> Clone for DeviceCatalog<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for DeviceCatalog<'_, A> {}

impl<'a, A: DisplayApi + ?Sized> DeviceCatalog<'a, A> {
    /// Catalog reading from `api`.
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Iterate over the device records the OS reports.
    pub fn devices(&self) -> Devices<'a, A> {
        Devices {
            api: self.api,
            index: 0,
            done: false,
        }
    }

    /// Distinct names of all devices. Empty when the OS reports none.
    pub fn list_devices(&self) -> Result<BTreeSet<String>> {
        self.devices()
            .map(|device| device.map(|device| device.name))
            .collect()
    }

    /// Find one device record by name.
    pub fn device(&self, name: &str) -> Result<DisplayDevice> {
        for device in self.devices() {
            let device = device?;
            if device.name == name {
                return Ok(device);
            }
        }
        Err(Error::DeviceNotFound(name.to_string()))
    }

    /// Iterate over the modes `device` supports.
    ///
    /// An unknown device yields an empty sequence.
    pub fn modes(&self, device: &str) -> Modes<'a, A> {
        Modes {
            api: self.api,
            device: device.to_string(),
            index: 0,
            done: false,
        }
    }

    /// The mode `device` is using right now.
    ///
    /// A name the OS cannot even be asked about is reported as not found.
    pub fn current_mode(&self, device: &str) -> Result<DisplayMode> {
        log::debug!("Reading current settings of {device}");
        match self.api.enum_mode(device, ModeIndex::Current) {
            Ok(Some(mode)) => Ok(mode),
            Ok(None) => Err(Error::DeviceNotFound(device.to_string())),
            Err(Error::InvalidDeviceName(name)) => Err(Error::DeviceNotFound(name)),
            Err(err) => Err(err),
        }
    }
}

/// Iterator over display devices. See [`DeviceCatalog::devices`].
///
/// A failed OS call is yielded once as `Err` and ends the iteration.
pub struct Devices<'a, A: ?Sized> {
    api: &'a A,
    index: u32,
    done: bool,
}

impl<A: DisplayApi + ?Sized> Iterator for Devices<'_, A> {
    type Item = Result<DisplayDevice>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.api.enum_device(self.index) {
            Ok(Some(device)) => {
                log::debug!("Found device {} at index {}", device.name, self.index);
                self.index += 1;
                Some(Ok(device))
            }
            Ok(None) => {
                log::debug!("Device enumeration ended after {} devices", self.index);
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<A: DisplayApi + ?Sized> FusedIterator for Devices<'_, A> {}

/// Iterator over one device's modes. See [`DeviceCatalog::modes`].
///
/// A failed OS call ends this device's walk; it is logged, not yielded.
pub struct Modes<'a, A: ?Sized> {
    api: &'a A,
    device: String,
    index: u32,
    done: bool,
}

impl<A: ?Sized> Modes<'_, A> {
    /// Device whose modes are being walked.
    pub fn device(&self) -> &str {
        &self.device
    }
}

impl<A: DisplayApi + ?Sized> Iterator for Modes<'_, A> {
    type Item = DisplayMode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.api.enum_mode(&self.device, ModeIndex::Ordinal(self.index)) {
            Ok(Some(mode)) => {
                log::trace!("Mode {} of {}: {}", self.index, self.device, mode);
                self.index += 1;
                Some(mode)
            }
            Ok(None) => {
                log::debug!("Finished checking {} modes for {}", self.index, self.device);
                self.done = true;
                None
            }
            Err(err) => {
                log::warn!(
                    "Stopped walking modes of {} at index {}: {}",
                    self.device,
                    self.index,
                    err
                );
                self.done = true;
                None
            }
        }
    }
}

impl<A: DisplayApi + ?Sized> FusedIterator for Modes<'_, A> {}
