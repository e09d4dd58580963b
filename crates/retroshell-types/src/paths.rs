//! Default filesystem locations derived once at bootstrap.
//!
//! A frontend driver computes a [`DefaultPaths`] from its platform base
//! directory during `environment_settings`. The value is immutable afterwards
//! and handed by reference to everything that needs a location.
//!
//! Paths are plain strings rather than `std::path::PathBuf` because most
//! targets use device-prefixed roots (`sdmc:/`, `ms0:/`) that are not host
//! paths. Directories always carry a trailing `/`.

use serde::{Deserialize, Serialize};

/// Base directory used when a driver supplies no platform data.
pub const BUILTIN_PORT_DIR: &str = "./";

/// File name of the main configuration file under the port directory.
pub const CONFIG_FILE_NAME: &str = "retroarch.cfg";

/// The set of default directories and files a frontend reads at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPaths {
    /// Platform base directory everything else hangs off.
    pub port: String,
    /// Downloaded core assets.
    pub core_assets: String,
    /// Menu media (fonts, overlays, wallpapers).
    pub assets: String,
    /// Core binaries.
    pub core: String,
    /// Core info files.
    pub core_info: String,
    pub savestate: String,
    pub sram: String,
    /// BIOS and other system files.
    pub system: String,
    pub playlist: String,
    pub remap: String,
    /// Content databases.
    pub database: String,
    /// Database cursor files.
    pub cursor: String,
    /// Main configuration file.
    pub config: String,
}

impl DefaultPaths {
    /// Derive every location from a port base directory.
    ///
    /// Downloads, media, cores, core info, remaps and databases join onto the
    /// port directory; savestates, savefiles, system and playlists join onto
    /// the already derived core directory.
    pub fn derive(port: &str) -> Self {
        let port = ensure_trailing_slash(port);
        let core = join_dir(&port, "cores");
        let database = join_dir(&port, "database");
        Self {
            core_assets: join_dir(&port, "downloads"),
            assets: join_dir(&port, "media"),
            core_info: join_dir(&port, "cores"),
            savestate: join_dir(&core, "savestates"),
            sram: join_dir(&core, "savefiles"),
            system: join_dir(&core, "system"),
            playlist: join_dir(&core, "playlists"),
            remap: join_dir(&port, "remaps"),
            cursor: join_dir(&database, "cursors"),
            database: join_dir(&database, "rdb"),
            config: join_file(&port, CONFIG_FILE_NAME),
            core,
            port,
        }
    }

    /// Defaults used when the driver has no environment hook.
    pub fn builtin() -> Self {
        Self::derive(BUILTIN_PORT_DIR)
    }

    /// Every directory in the set, with its role name.
    pub fn directories(&self) -> [(&'static str, &str); 12] {
        [
            ("port", &self.port),
            ("core_assets", &self.core_assets),
            ("assets", &self.assets),
            ("core", &self.core),
            ("core_info", &self.core_info),
            ("savestate", &self.savestate),
            ("sram", &self.sram),
            ("system", &self.system),
            ("playlist", &self.playlist),
            ("remap", &self.remap),
            ("database", &self.database),
            ("cursor", &self.cursor),
        ]
    }
}

impl Default for DefaultPaths {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Return `path` with exactly one trailing `/` (empty stays empty).
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Join a directory name onto `base`, producing a directory path.
pub fn join_dir(base: &str, name: &str) -> String {
    ensure_trailing_slash(&join_file(base, name))
}

/// Join a file name onto `base`.
pub fn join_file(base: &str, name: &str) -> String {
    let name = name.trim_start_matches('/');
    if base.is_empty() {
        return name.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Directory part of a file path, including the trailing `/`.
///
/// `sdmc:/retroarch/test.3dsx` becomes `sdmc:/retroarch/`. A path with no
/// separator yields the empty string.
pub fn base_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(i) => path[..=i].to_string(),
        None => String::new(),
    }
}

/// Final component of a path, ignoring a trailing `/`.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Lower-cased extension of a file path, without the dot.
pub fn extension(path: &str) -> Option<String> {
    let name = base_name(path);
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot + 1..].to_ascii_lowercase())
}
