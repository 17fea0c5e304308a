//! Windows display enumeration and mode changes.

use super::devmode::DevModeBuffer;
use crate::api::{ApplyMode, ModeIndex};
use crate::device::{DisplayDevice, StateFlags, validate_name};
use crate::error::{Error, Result};
use crate::mode::DisplayMode;
use std::mem::size_of;
use windows::Win32::Graphics::Gdi::{
    CDS_TEST, CDS_TYPE, CDS_UPDATEREGISTRY, ChangeDisplaySettingsExW, ChangeDisplaySettingsW,
    DISPLAY_DEVICEW, ENUM_CURRENT_SETTINGS, ENUM_DISPLAY_SETTINGS_MODE, EnumDisplayDevicesW,
    EnumDisplaySettingsW,
};
use windows::core::PCWSTR;

pub fn enum_device(index: u32) -> Result<Option<DisplayDevice>> {
    let mut record = DISPLAY_DEVICEW {
        cb: size_of::<DISPLAY_DEVICEW>() as u32,
        ..Default::default()
    };

    let ok = unsafe { EnumDisplayDevicesW(PCWSTR::null(), index, &mut record, 0) };
    if !ok.as_bool() {
        return Ok(None);
    }

    Ok(Some(decode_device(&record)))
}

fn decode_device(record: &DISPLAY_DEVICEW) -> DisplayDevice {
    DisplayDevice {
        name: from_wide(&record.DeviceName),
        description: from_wide(&record.DeviceString),
        state_flags: StateFlags::from_bits_retain(record.StateFlags.0),
        device_id: from_wide(&record.DeviceID),
        device_key: from_wide(&record.DeviceKey),
    }
}

pub fn enum_mode(device: &str, index: ModeIndex) -> Result<Option<DisplayMode>> {
    let name = to_wide(device)?;
    let mode_num = match index {
        ModeIndex::Current => ENUM_CURRENT_SETTINGS,
        ModeIndex::Ordinal(n) => ENUM_DISPLAY_SETTINGS_MODE(n),
    };

    let mut buffer = DevModeBuffer::for_query();
    let ok = unsafe { EnumDisplaySettingsW(PCWSTR(name.as_ptr()), mode_num, buffer.as_mut_ptr()) };
    if ok.as_bool() {
        Ok(Some(buffer.to_mode()))
    } else {
        Ok(None)
    }
}

pub fn change_global(mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
    let buffer = DevModeBuffer::from_mode(mode);
    let result = unsafe { ChangeDisplaySettingsW(Some(buffer.as_ptr()), cds_flags(apply)) };
    Ok(result.0)
}

pub fn change_device(device: &str, mode: &DisplayMode, apply: ApplyMode) -> Result<i32> {
    let name = to_wide(device)?;
    let buffer = DevModeBuffer::from_mode(mode);
    let result = unsafe {
        ChangeDisplaySettingsExW(
            PCWSTR(name.as_ptr()),
            Some(buffer.as_ptr()),
            None,
            cds_flags(apply),
            None,
        )
    };
    Ok(result.0)
}

fn cds_flags(apply: ApplyMode) -> CDS_TYPE {
    match apply {
        ApplyMode::Dynamic => CDS_TYPE(0),
        ApplyMode::Persistent => CDS_UPDATEREGISTRY,
        ApplyMode::Test => CDS_TEST,
    }
}

/// NUL-terminated UTF-16 copy of a device name.
fn to_wide(name: &str) -> Result<Vec<u16>> {
    if !validate_name(name) {
        return Err(Error::InvalidDeviceName(name.to_string()));
    }
    Ok(name.encode_utf16().chain(std::iter::once(0)).collect())
}

fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|c| *c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len]).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Graphics::Gdi::DISPLAY_DEVICE_STATE_FLAGS;

    fn fill(dst: &mut [u16], text: &str) {
        for (slot, unit) in dst.iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }
    }

    #[test]
    fn test_decode_device() {
        let mut record = DISPLAY_DEVICEW {
            cb: size_of::<DISPLAY_DEVICEW>() as u32,
            StateFlags: DISPLAY_DEVICE_STATE_FLAGS(0x0001_0005),
            ..Default::default()
        };
        fill(&mut record.DeviceName, r"\\.\DISPLAY1");
        fill(&mut record.DeviceString, "Test Adapter ");
        fill(&mut record.DeviceID, r"PCI\VEN_0000");

        let device = decode_device(&record);
        assert_eq!(device.name, r"\\.\DISPLAY1");
        assert_eq!(device.description, "Test Adapter");
        assert_eq!(device.device_id, r"PCI\VEN_0000");
        assert!(device.device_key.is_empty());
        assert!(device.is_attached());
        assert!(device.is_primary());
        assert_eq!(device.state_flags.bits(), 0x0001_0005);
    }

    #[test]
    fn test_wide_strings() {
        let wide = to_wide(r"\\.\DISPLAY1").unwrap();
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(from_wide(&wide), r"\\.\DISPLAY1");
        assert!(matches!(
            to_wide(&"X".repeat(40)),
            Err(Error::InvalidDeviceName(_))
        ));
    }

    #[test]
    fn test_cds_flags() {
        assert_eq!(cds_flags(ApplyMode::Dynamic), CDS_TYPE(0));
        assert_eq!(cds_flags(ApplyMode::Persistent), CDS_UPDATEREGISTRY);
        assert_eq!(cds_flags(ApplyMode::Test), CDS_TEST);
    }
}
