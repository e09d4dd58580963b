//! Foundation types for retroshell.
//!
//! This crate contains the platform-agnostic types shared by every retroshell
//! crate: the error enum, the TOML configuration, the default path set that
//! frontend drivers derive at bootstrap, and the menu entry list that drivers
//! and displaylist strategies both write into.

pub mod config;
pub mod error;
pub mod list;
pub mod paths;

/// Maximum length in bytes of any path-like string crossing a crate boundary.
pub const PATH_MAX_LENGTH: usize = 4096;
