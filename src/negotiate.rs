//! Resolution support checks and change payloads.
//!
//! Every payload starts from the device's live current mode and overwrites
//! only the requested fields. A mode built from scratch would submit zeroed
//! values for everything the caller did not set.

use crate::api::DisplayApi;
use crate::catalog::DeviceCatalog;
use crate::error::Result;
use crate::mode::DisplayMode;
use std::collections::BTreeSet;

/// Decides whether a resolution is available and prepares change payloads.
pub struct ModeNegotiator<'a, A: ?Sized> {
    catalog: DeviceCatalog<'a, A>,
}

impl<A: ?Sized> Clone for ModeNegotiator<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for ModeNegotiator<'_, A> {}

impl<'a, A: DisplayApi + ?Sized> ModeNegotiator<'a, A> {
    /// Negotiator reading from `api`.
    pub fn new(api: &'a A) -> Self {
        Self {
            catalog: DeviceCatalog::new(api),
        }
    }

    /// Whether `device` lists a mode of exactly `width` x `height`.
    ///
    /// Color depth, refresh rate and position are not compared. Stops at the
    /// first match.
    pub fn is_supported(&self, device: &str, width: u32, height: u32) -> bool {
        let supported = self
            .catalog
            .modes(device)
            .any(|mode| mode.width == width && mode.height == height);
        log::debug!("{width}x{height} supported on {device}: {supported}");
        supported
    }

    /// Distinct resolutions `device` lists, smallest first.
    pub fn supported_resolutions(&self, device: &str) -> BTreeSet<(u32, u32)> {
        self.catalog
            .modes(device)
            .map(|mode| mode.resolution())
            .collect()
    }

    /// The current mode of `device` with its resolution replaced.
    pub fn build_resolution_change(
        &self,
        device: &str,
        width: u32,
        height: u32,
    ) -> Result<DisplayMode> {
        let current = self.catalog.current_mode(device)?;
        Ok(current.with_resolution(width, height))
    }

    /// The current mode of `device` with its position replaced.
    pub fn build_position_change(&self, device: &str, x: i32, y: i32) -> Result<DisplayMode> {
        let current = self.catalog.current_mode(device)?;
        Ok(current.with_position(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DisplayDevice;
    use crate::error::Error;
    use crate::testing::{FakeApi, os_mode, two_displays};

    #[test]
    fn test_is_supported() {
        let api = two_displays();
        let negotiator = ModeNegotiator::new(&api);
        assert!(negotiator.is_supported("DISPLAY1", 1920, 1080));
        assert!(negotiator.is_supported("DISPLAY1", 1280, 720));
        assert!(!negotiator.is_supported("DISPLAY1", 640, 480));
        assert!(!negotiator.is_supported("DISPLAY1", 1080, 1920));
    }

    #[test]
    fn test_is_supported_matches_mode_list() {
        let api = two_displays();
        let negotiator = ModeNegotiator::new(&api);
        let catalog = DeviceCatalog::new(&api);
        let listed: BTreeSet<_> = catalog.modes("DISPLAY2").map(|m| m.resolution()).collect();

        for (width, height) in [(1280, 1024), (1024, 768), (1920, 1080), (800, 600)] {
            assert_eq!(
                negotiator.is_supported("DISPLAY2", width, height),
                listed.contains(&(width, height))
            );
        }
    }

    #[test]
    fn test_is_supported_short_circuits() {
        let api = two_displays();
        let negotiator = ModeNegotiator::new(&api);
        assert!(negotiator.is_supported("DISPLAY1", 1024, 768));
        assert_eq!(api.mode_calls.get(), 1);
    }

    #[test]
    fn test_is_supported_without_modes() {
        let api = FakeApi::new().with_display(
            DisplayDevice::new("DISPLAY1"),
            os_mode(1920, 1080, 60),
            Vec::new(),
        );
        let negotiator = ModeNegotiator::new(&api);
        assert!(!negotiator.is_supported("DISPLAY1", 1920, 1080));
        assert!(!negotiator.is_supported("DISPLAY9", 1920, 1080));
    }

    #[test]
    fn test_supported_resolutions_are_distinct() {
        let api = two_displays();
        let resolutions = ModeNegotiator::new(&api).supported_resolutions("DISPLAY1");
        let expected: BTreeSet<_> = [(1024, 768), (1280, 720), (1920, 1080)].into();
        assert_eq!(resolutions, expected);
    }

    #[test]
    fn test_resolution_change_starts_from_current() {
        let api = two_displays();
        let negotiator = ModeNegotiator::new(&api);
        let current = DeviceCatalog::new(&api).current_mode("DISPLAY2").unwrap();

        let change = negotiator
            .build_resolution_change("DISPLAY2", 1024, 768)
            .unwrap();
        assert_eq!(change.resolution(), (1024, 768));
        assert_eq!(change.clone().with_resolution(1280, 1024), current);
        assert_eq!(change.raw(), current.raw());
    }

    #[test]
    fn test_position_change_starts_from_current() {
        let api = two_displays();
        let negotiator = ModeNegotiator::new(&api);
        let current = DeviceCatalog::new(&api).current_mode("DISPLAY1").unwrap();
        assert_eq!(current.position(), (0, 0));

        let change = negotiator.build_position_change("DISPLAY1", 1920, 0).unwrap();
        assert_eq!(change, current.with_position(1920, 0));
    }

    #[test]
    fn test_build_for_unknown_device() {
        let api = two_displays();
        let negotiator = ModeNegotiator::new(&api);
        assert!(matches!(
            negotiator.build_resolution_change("DISPLAY5", 800, 600),
            Err(Error::DeviceNotFound(_))
        ));
        assert!(matches!(
            negotiator.build_position_change("DISPLAY5", 0, 0),
            Err(Error::DeviceNotFound(_))
        ));
        assert!(matches!(
            negotiator.build_resolution_change(&"D".repeat(32), 800, 600),
            Err(Error::DeviceNotFound(_))
        ));
    }
}
