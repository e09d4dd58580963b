//! Concrete frontend drivers and the runtime registry.
//!
//! Hosted drivers are constructed by name. The handheld driver needs its
//! hardware services handed in, so it is built directly by the platform's
//! entry point rather than through the registry.

pub mod ctr;
pub mod desktop;
pub mod dspfirm;
pub mod null;

pub use ctr::{AudioBackend, AudioSlots, CtrDriver, CtrHeap, CtrMemory, CtrSystem, Subsystems};
pub use desktop::DesktopDriver;
pub use null::NullDriver;

use crate::driver::FrontendDriver;

/// Names accepted by [`find_driver`].
pub const DRIVER_NAMES: &[&str] = &["desktop", "null"];

/// Construct a registered driver by name.
pub fn find_driver(name: &str) -> Option<Box<dyn FrontendDriver>> {
    match name {
        "desktop" => Some(Box::new(DesktopDriver::new())),
        "null" => Some(Box::new(NullDriver)),
        _ => None,
    }
}

/// The driver for the build target.
pub fn default_driver() -> Box<dyn FrontendDriver> {
    Box::new(DesktopDriver::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_resolves() {
        for name in DRIVER_NAMES {
            let driver = find_driver(name).unwrap();
            assert_eq!(driver.ident(), *name);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(find_driver("ps2").is_none());
    }

    #[test]
    fn default_is_desktop() {
        assert_eq!(default_driver().ident(), "desktop");
    }
}
