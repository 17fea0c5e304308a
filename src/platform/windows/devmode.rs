//! `DEVMODEW` buffers with room for driver-private data.

use crate::mode::{DisplayMode, Orientation, RawDescriptor};
use std::mem::size_of;
use windows::Win32::Foundation::POINTL;
use windows::Win32::Graphics::Gdi::{
    DEVMODE_DISPLAY_ORIENTATION, DEVMODEW, DM_BITSPERPEL, DM_DISPLAYFREQUENCY,
    DM_DISPLAYORIENTATION, DM_PELSHEIGHT, DM_PELSWIDTH, DM_POSITION,
};

/// Bytes reserved after the public `DEVMODEW` fields for driver data.
const DRIVER_EXTRA_CAPACITY: usize = 4096;

/// A `DEVMODEW` followed by its driver-private extra bytes, laid out the way
/// the OS expects (`dmSize` public bytes, then `dmDriverExtra` bytes).
#[repr(C)]
pub(super) struct DevModeBuffer {
    mode: DEVMODEW,
    extra: [u8; DRIVER_EXTRA_CAPACITY],
}

impl DevModeBuffer {
    fn zeroed() -> Self {
        Self {
            mode: DEVMODEW::default(),
            extra: [0; DRIVER_EXTRA_CAPACITY],
        }
    }

    /// An empty buffer for `EnumDisplaySettingsW` to fill.
    pub fn for_query() -> Self {
        let mut buffer = Self::zeroed();
        buffer.mode.dmSize = size_of::<DEVMODEW>() as u16;
        buffer.mode.dmDriverExtra = DRIVER_EXTRA_CAPACITY as u16;
        buffer
    }

    /// Rebuild the OS structure for `mode`.
    ///
    /// The raw descriptor is copied back byte for byte; only resolution and
    /// position are written over it, and only when they differ from it.
    pub fn from_mode(mode: &DisplayMode) -> Self {
        let mut buffer = Self::zeroed();
        let raw = mode.raw().as_bytes();

        if raw.is_empty() {
            buffer.fill_unmodeled(mode);
        } else {
            let len = raw.len().min(size_of::<Self>());
            unsafe {
                std::ptr::copy_nonoverlapping(
                    raw.as_ptr(),
                    (&mut buffer as *mut Self).cast::<u8>(),
                    len,
                );
            }
            buffer.clamp_sizes();
        }

        let dm = &mut buffer.mode;
        if dm.dmPelsWidth != mode.width || dm.dmPelsHeight != mode.height {
            dm.dmPelsWidth = mode.width;
            dm.dmPelsHeight = mode.height;
            dm.dmFields |= DM_PELSWIDTH | DM_PELSHEIGHT;
        }

        let position = unsafe { dm.Anonymous1.Anonymous2.dmPosition };
        if position.x != mode.position_x || position.y != mode.position_y {
            unsafe {
                dm.Anonymous1.Anonymous2.dmPosition = POINTL {
                    x: mode.position_x,
                    y: mode.position_y,
                };
            }
            dm.dmFields |= DM_POSITION;
        }

        buffer
    }

    /// Decode the filled buffer.
    pub fn to_mode(&self) -> DisplayMode {
        let dm = &self.mode;
        let (position, orientation) = unsafe {
            (
                dm.Anonymous1.Anonymous2.dmPosition,
                dm.Anonymous1.Anonymous2.dmDisplayOrientation,
            )
        };

        DisplayMode::new(dm.dmPelsWidth, dm.dmPelsHeight)
            .with_position(position.x, position.y)
            .with_bits_per_pixel(dm.dmBitsPerPel)
            .with_refresh_hz(dm.dmDisplayFrequency)
            .with_orientation(Orientation::from_raw(orientation.0))
            .with_raw(RawDescriptor::new(self.as_bytes().to_vec()))
    }

    pub fn as_ptr(&self) -> *const DEVMODEW {
        (self as *const Self).cast()
    }

    pub fn as_mut_ptr(&mut self) -> *mut DEVMODEW {
        (self as *mut Self).cast()
    }

    fn as_bytes(&self) -> &[u8] {
        let len = self.mode.dmSize as usize + self.mode.dmDriverExtra as usize;
        let len = len.min(size_of::<Self>());
        unsafe { std::slice::from_raw_parts((self as *const Self).cast::<u8>(), len) }
    }

    /// Keep the size fields within this buffer after a raw copy.
    fn clamp_sizes(&mut self) {
        let public = size_of::<DEVMODEW>();
        if self.mode.dmSize as usize > public || self.mode.dmSize == 0 {
            self.mode.dmSize = public as u16;
        }
        let room = size_of::<Self>() - self.mode.dmSize as usize;
        if self.mode.dmDriverExtra as usize > room {
            self.mode.dmDriverExtra = room as u16;
        }
    }

    /// Set up a mode that never came from the OS.
    fn fill_unmodeled(&mut self, mode: &DisplayMode) {
        let dm = &mut self.mode;
        dm.dmSize = size_of::<DEVMODEW>() as u16;
        dm.dmDriverExtra = 0;
        if mode.bits_per_pixel() > 0 {
            dm.dmBitsPerPel = mode.bits_per_pixel();
            dm.dmFields |= DM_BITSPERPEL;
        }
        if mode.refresh_hz() > 1 {
            dm.dmDisplayFrequency = mode.refresh_hz();
            dm.dmFields |= DM_DISPLAYFREQUENCY;
        }
        if mode.orientation() != Orientation::Default {
            unsafe {
                dm.Anonymous1.Anonymous2.dmDisplayOrientation =
                    DEVMODE_DISPLAY_ORIENTATION(mode.orientation().to_raw());
            }
            dm.dmFields |= DM_DISPLAYORIENTATION;
        }
    }
}
