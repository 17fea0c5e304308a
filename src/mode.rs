//! Display modes and their opaque OS descriptors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display rotation, relative to the device's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Natural orientation.
    #[default]
    Default,
    /// Rotated 90 degrees.
    Rotated90,
    /// Rotated 180 degrees.
    Rotated180,
    /// Rotated 270 degrees.
    Rotated270,
}

impl Orientation {
    /// Decode the OS orientation value. Unknown values read as `Default`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Orientation::Rotated90,
            2 => Orientation::Rotated180,
            3 => Orientation::Rotated270,
            _ => Orientation::Default,
        }
    }

    /// The OS orientation value.
    pub fn to_raw(self) -> u32 {
        match self {
            Orientation::Default => 0,
            Orientation::Rotated90 => 1,
            Orientation::Rotated180 => 2,
            Orientation::Rotated270 => 3,
        }
    }

    /// Rotation in degrees.
    pub fn degrees(self) -> u32 {
        self.to_raw() * 90
    }
}

/// The byte image of a mode as the OS returned it.
///
/// It carries every field this crate does not model (driver version, display
/// flags, driver-private extra bytes, ...) so a mode can be resubmitted without
/// disturbing them. An empty descriptor means the mode was built by hand.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RawDescriptor(Vec<u8>);

impl RawDescriptor {
    /// Wrap a byte image.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The byte image.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the image.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for modes that never came from the OS.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RawDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawDescriptor({} bytes)", self.0.len())
    }
}

/// One configuration a display device supports or currently uses.
///
/// Only resolution and position are meant to be changed by callers; the rest
/// is read-only and travels with the mode in its [`RawDescriptor`]. Always
/// start a change from a mode the OS returned, never from [`DisplayMode::new`],
/// or the fields this crate does not model are reset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayMode {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Left edge in virtual-desktop coordinates.
    pub position_x: i32,
    /// Top edge in virtual-desktop coordinates.
    pub position_y: i32,
    bits_per_pixel: u32,
    refresh_hz: u32,
    orientation: Orientation,
    #[cfg_attr(feature = "serde", serde(skip))]
    raw: RawDescriptor,
}

impl DisplayMode {
    /// Create a mode with a resolution and nothing else.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            position_x: 0,
            position_y: 0,
            bits_per_pixel: 0,
            refresh_hz: 0,
            orientation: Orientation::Default,
            raw: RawDescriptor::default(),
        }
    }

    /// Replace the resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the position.
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position_x = x;
        self.position_y = y;
        self
    }

    /// Set the color depth.
    pub fn with_bits_per_pixel(mut self, bits: u32) -> Self {
        self.bits_per_pixel = bits;
        self
    }

    /// Set the refresh rate.
    pub fn with_refresh_hz(mut self, hz: u32) -> Self {
        self.refresh_hz = hz;
        self
    }

    /// Set the rotation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Attach the OS byte image this mode was decoded from.
    pub fn with_raw(mut self, raw: RawDescriptor) -> Self {
        self.raw = raw;
        self
    }

    /// `(width, height)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `(x, y)`.
    pub fn position(&self) -> (i32, i32) {
        (self.position_x, self.position_y)
    }

    /// Color depth; 0 when the OS did not report one.
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    /// Refresh rate; 0 or 1 means the hardware default.
    pub fn refresh_hz(&self) -> u32 {
        self.refresh_hz
    }

    /// Rotation of the desktop on this device.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The OS byte image; empty for hand-built modes.
    pub fn raw(&self) -> &RawDescriptor {
        &self.raw
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        if self.bits_per_pixel > 0 {
            write!(f, " {}bpp", self.bits_per_pixel)?;
        }
        if self.refresh_hz > 1 {
            write!(f, " @{}Hz", self.refresh_hz)?;
        }
        write!(f, " at ({}, {})", self.position_x, self.position_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_raw() {
        assert_eq!(Orientation::from_raw(0), Orientation::Default);
        assert_eq!(Orientation::from_raw(3), Orientation::Rotated270);
        assert_eq!(Orientation::from_raw(42), Orientation::Default);
        assert_eq!(Orientation::Rotated90.degrees(), 90);
        assert_eq!(Orientation::Rotated180.to_raw(), 2);
    }

    #[test]
    fn test_resolution_change_keeps_other_fields() {
        let mode = DisplayMode::new(1920, 1080)
            .with_position(-1280, 0)
            .with_bits_per_pixel(32)
            .with_refresh_hz(144)
            .with_orientation(Orientation::Rotated90)
            .with_raw(RawDescriptor::new(vec![1, 2, 3]));

        let changed = mode.clone().with_resolution(1280, 720);
        assert_eq!(changed.resolution(), (1280, 720));
        assert_eq!(changed.position(), (-1280, 0));
        assert_eq!(changed.bits_per_pixel(), 32);
        assert_eq!(changed.refresh_hz(), 144);
        assert_eq!(changed.orientation(), Orientation::Rotated90);
        assert_eq!(changed.raw(), mode.raw());
    }

    #[test]
    fn test_display_format() {
        let mode = DisplayMode::new(2560, 1440)
            .with_bits_per_pixel(32)
            .with_refresh_hz(60)
            .with_position(1920, 0);
        assert_eq!(mode.to_string(), "2560x1440 32bpp @60Hz at (1920, 0)");
        assert_eq!(DisplayMode::new(800, 600).to_string(), "800x600 at (0, 0)");
    }

    #[test]
    fn test_raw_debug_hides_bytes() {
        let raw = RawDescriptor::new(vec![0; 220]);
        assert_eq!(format!("{raw:?}"), "RawDescriptor(220 bytes)");
        assert_eq!(raw.len(), 220);
        assert!(!raw.is_empty());
        assert!(RawDescriptor::default().is_empty());
    }
}
