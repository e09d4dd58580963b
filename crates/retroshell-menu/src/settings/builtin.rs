//! Settings tree shipped with the shell.

pub(super) const BUILTIN_SCHEMA: &str = include_str!("builtin.toml");
