//! Backing stores the strategies pull entries from.
//!
//! Every source is optional. A strategy whose source is missing or fails
//! returns an error and the dispatcher shows the placeholder instead.

use serde::{Deserialize, Serialize};

use retroshell_platform::FrontendDriver;
use retroshell_types::config::MenuConfig;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::paths::{DefaultPaths, base_name, join_file};
use retroshell_vfs::Vfs;

use crate::settings::SettingsSchema;

// ---------------------------------------------------------------------------
// Core catalog
// ---------------------------------------------------------------------------

/// What the catalog knows about one core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreInfo {
    /// Library path, the core's identity.
    pub path: String,
    pub display_name: String,
    pub system_name: String,
    /// Lower-case content extensions, no dots.
    pub supported_extensions: Vec<String>,
    /// Database (collection) names the core can run.
    pub databases: Vec<String>,
    pub authors: Vec<String>,
    pub license: Option<String>,
    pub version: Option<String>,
}

impl CoreInfo {
    pub fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Label used in lists; falls back to the library file name.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            base_name(&self.path)
        } else {
            &self.display_name
        }
    }
}

/// One option exposed by the running core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreOption {
    pub key: String,
    pub description: String,
    pub value: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Installed and downloadable cores.
pub trait CoreCatalog {
    fn cores(&self) -> Result<Vec<CoreInfo>>;

    /// Cores offered by the online updater.
    fn updater_cores(&self) -> Result<Vec<CoreInfo>> {
        Err(ShellError::Source("core updater not available".into()))
    }

    /// Options of the loaded core.
    fn core_options(&self) -> Result<Vec<CoreOption>> {
        Err(ShellError::Source("no core loaded".into()))
    }

    fn core_info(&self, path: &str) -> Result<Option<CoreInfo>> {
        Ok(self.cores()?.into_iter().find(|c| c.path == path))
    }
}

// ---------------------------------------------------------------------------
// Playlists
// ---------------------------------------------------------------------------

/// One playlist row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistItem {
    pub path: String,
    pub label: String,
    pub core_path: String,
    pub core_name: String,
    pub crc32: String,
    pub db_name: String,
}

impl PlaylistItem {
    /// Label, or the content file name when the label is blank.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            base_name(&self.path)
        } else {
            &self.label
        }
    }
}

/// Named playlists.
pub trait PlaylistStore {
    fn playlist(&self, name: &str) -> Result<Vec<PlaylistItem>>;

    /// Names of every playlist, without extension.
    fn playlists(&self) -> Result<Vec<String>>;
}

/// Playlist file extension.
pub const PLAYLIST_EXT: &str = "lpl";

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

/// Playlists stored as JSON `.lpl` files in one directory.
pub struct JsonPlaylistStore<'a> {
    vfs: &'a dyn Vfs,
    dir: String,
}

impl<'a> JsonPlaylistStore<'a> {
    pub fn new(vfs: &'a dyn Vfs, dir: impl Into<String>) -> Self {
        Self {
            vfs,
            dir: dir.into(),
        }
    }

    fn file_for(&self, name: &str) -> String {
        let name = name.strip_suffix(".lpl").unwrap_or(name);
        join_file(&self.dir, &format!("{name}.{PLAYLIST_EXT}"))
    }
}

impl PlaylistStore for JsonPlaylistStore<'_> {
    fn playlist(&self, name: &str) -> Result<Vec<PlaylistItem>> {
        let path = self.file_for(name);
        let data = self.vfs.read(&path)?;
        let file: PlaylistFile = serde_json::from_slice(&data)?;
        log::debug!("playlist {path}: {} items", file.items.len());
        Ok(file.items)
    }

    fn playlists(&self) -> Result<Vec<String>> {
        let suffix = format!(".{PLAYLIST_EXT}");
        Ok(self
            .vfs
            .readdir(&self.dir)?
            .into_iter()
            .filter_map(|e| e.name.strip_suffix(&suffix).map(str::to_string))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Databases
// ---------------------------------------------------------------------------

/// A database record: a name and its fields in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

/// Query access to the game databases.
pub trait DatabaseStore {
    /// Records of `database` matching `query`; an empty query matches all.
    fn query(&self, database: &str, query: &str) -> Result<Vec<DatabaseRecord>>;

    fn record(&self, database: &str, name: &str) -> Result<Option<DatabaseRecord>> {
        Ok(self
            .query(database, "")?
            .into_iter()
            .find(|r| r.name == name))
    }
}

// ---------------------------------------------------------------------------
// Counters and shader parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfCounter {
    pub ident: String,
    pub total: u64,
    pub call_count: u64,
}

pub trait PerfCounterSource {
    fn core_counters(&self) -> Vec<PerfCounter>;
    fn frontend_counters(&self) -> Vec<PerfCounter>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderParameter {
    pub id: String,
    pub description: String,
    pub current: f32,
    pub minimum: f32,
    pub maximum: f32,
    pub step: f32,
}

pub trait ShaderParamSource {
    /// Parameters of the active shader chain.
    fn parameters(&self) -> Vec<ShaderParameter>;
    /// Parameters as saved in the loaded preset.
    fn preset_parameters(&self) -> Vec<ShaderParameter>;
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Everything a strategy may read while building a list.
pub struct Sources<'a> {
    pub paths: &'a DefaultPaths,
    pub config: &'a MenuConfig,
    pub vfs: Option<&'a dyn Vfs>,
    pub driver: Option<&'a dyn FrontendDriver>,
    pub cores: Option<&'a dyn CoreCatalog>,
    pub playlists: Option<&'a dyn PlaylistStore>,
    pub databases: Option<&'a dyn DatabaseStore>,
    pub perf: Option<&'a dyn PerfCounterSource>,
    pub shaders: Option<&'a dyn ShaderParamSource>,
    pub settings: Option<&'a SettingsSchema>,
}

impl<'a> Sources<'a> {
    /// A context with only paths and options; every source absent.
    pub fn new(paths: &'a DefaultPaths, config: &'a MenuConfig) -> Self {
        Self {
            paths,
            config,
            vfs: None,
            driver: None,
            cores: None,
            playlists: None,
            databases: None,
            perf: None,
            shaders: None,
            settings: None,
        }
    }

    pub fn vfs(&self) -> Result<&'a dyn Vfs> {
        self.vfs.ok_or_else(|| missing("file system"))
    }

    pub fn driver(&self) -> Result<&'a dyn FrontendDriver> {
        self.driver.ok_or_else(|| missing("frontend driver"))
    }

    pub fn cores(&self) -> Result<&'a dyn CoreCatalog> {
        self.cores.ok_or_else(|| missing("core catalog"))
    }

    pub fn playlists(&self) -> Result<&'a dyn PlaylistStore> {
        self.playlists.ok_or_else(|| missing("playlist store"))
    }

    pub fn databases(&self) -> Result<&'a dyn DatabaseStore> {
        self.databases.ok_or_else(|| missing("database store"))
    }

    pub fn perf(&self) -> Result<&'a dyn PerfCounterSource> {
        self.perf.ok_or_else(|| missing("performance counters"))
    }

    pub fn shaders(&self) -> Result<&'a dyn ShaderParamSource> {
        self.shaders.ok_or_else(|| missing("shader parameters"))
    }

    pub fn settings(&self) -> Result<&'a SettingsSchema> {
        self.settings.ok_or_else(|| missing("settings schema"))
    }
}

fn missing(what: &str) -> ShellError {
    ShellError::Source(format!("{what} unavailable"))
}
