//! Frontend drivers for retroshell.
//!
//! A frontend driver owns process lifecycle for one platform: it derives the
//! default paths, acquires and releases platform subsystems, reports the CPU
//! family and storage roots, and signals shutdown. Every hook is optional;
//! the [`lifecycle::Frontend`] runtime checks a driver's
//! [`DriverCapabilities`] before calling anything, so application code never
//! branches on platform.

pub mod driver;
pub mod drivers;
pub mod heap;
pub mod lifecycle;

pub use driver::{
    Architecture, DriverCapabilities, ForkMode, FrontendDriver, LaunchArgs, OsInfo, PowerInfo,
    PowerState,
};
pub use drivers::{DRIVER_NAMES, default_driver, find_driver};
pub use heap::{HeapProvider, MemoryReport, SystemHeap, application_heap_size};
pub use lifecycle::{Frontend, Phase};
