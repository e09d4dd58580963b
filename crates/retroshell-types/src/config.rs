//! Frontend configuration loaded from TOML.
//!
//! Every field has a default so an empty (or missing) file yields a usable
//! configuration. Example:
//!
//! ```toml
//! driver = "desktop"
//! port_dir = "/opt/retroshell/"
//! log_file = "/tmp/retroshell.log"
//!
//! [menu]
//! show_hidden_files = false
//! show_advanced_settings = true
//!
//! [heap]
//! max_heap = 0x06000000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level frontend configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Frontend driver name; `None` picks the build target's default.
    pub driver: Option<String>,
    /// Override for the platform base directory.
    pub port_dir: Option<String>,
    /// Send log output to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    pub menu: MenuConfig,
    pub heap: HeapConfig,
}

/// Options consumed by the displaylist engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// List dot-files in file browser screens.
    pub show_hidden_files: bool,
    /// Show settings flagged as advanced.
    pub show_advanced_settings: bool,
    /// Sort file browser screens even when the request does not ask to.
    pub sort_file_lists: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            show_hidden_files: false,
            show_advanced_settings: false,
            sort_file_lists: true,
        }
    }
}

/// Thresholds for the handheld application heap computation.
///
/// The numbers are platform tuning values; they are configurable rather than
/// derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeapConfig {
    /// Lower bound for application memory when running under a loader.
    pub min_app_memory: u32,
    /// Bytes kept free for the system after both heaps are placed.
    pub reserve_slack: u32,
    /// Hard cap on the application heap.
    pub max_heap: u32,
    /// Allocation granularity; available memory is aligned down to it.
    pub page_size: u32,
    /// Requested application heap size.
    pub heap_size: u32,
    /// Requested linear (GPU-visible) heap size.
    pub linear_heap_size: u32,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            min_app_memory: 0x0400_0000,
            reserve_slack: 0x0001_0000,
            max_heap: 0x0600_0000,
            page_size: 0x1000,
            heap_size: 0x0600_0000,
            linear_heap_size: 0x0100_0000,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file. A missing file yields the defaults; a
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loaded config from {}", path.display());
                Self::from_toml_str(&text)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(e.into()),
        }
    }
}
