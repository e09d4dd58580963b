//! Menu entries and the ordered list they live in.
//!
//! Frontend drivers append drive roots into a [`FileList`]; displaylist
//! strategies append everything else. Insertion order is rendering order.

use serde::{Deserialize, Serialize};

/// Broad family a [`ListType`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListCategory {
    Navigation,
    Settings,
    ContentSource,
    Database,
    FileBrowser,
    Info,
}

macro_rules! list_types {
    ($($variant:ident => ($name:literal, $category:ident)),* $(,)?) => {
        /// Tag naming which navigable list a request wants built.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum ListType {
            $($variant,)*
        }

        impl ListType {
            /// Every tag, in declaration order.
            pub const ALL: &'static [ListType] = &[$(ListType::$variant,)*];

            /// Stable snake_case identifier, used in logs and frame labels.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ListType::$variant => $name,)*
                }
            }

            /// Screen family this tag belongs to.
            pub fn category(self) -> ListCategory {
                match self {
                    $(ListType::$variant => ListCategory::$category,)*
                }
            }
        }
    };
}

list_types! {
    None => ("none", Navigation),
    Info => ("info", Info),
    Help => ("help", Info),
    HelpScreenList => ("help_screen_list", Navigation),
    MainMenu => ("main_menu", Navigation),
    Generic => ("generic", Navigation),
    Settings => ("settings", Settings),
    SettingsAll => ("settings_all", Settings),
    Horizontal => ("horizontal", ContentSource),
    HorizontalContentActions => ("horizontal_content_actions", Navigation),
    History => ("history", ContentSource),
    PlaylistCollection => ("playlist_collection", ContentSource),
    Default => ("default", FileBrowser),
    Cores => ("cores", ContentSource),
    CoresSupported => ("cores_supported", ContentSource),
    CoresCollectionSupported => ("cores_collection_supported", ContentSource),
    CoresUpdater => ("cores_updater", ContentSource),
    CoresDetected => ("cores_detected", ContentSource),
    CoreOptions => ("core_options", ContentSource),
    CoreInfo => ("core_info", Info),
    PerfcountersCore => ("perfcounters_core", Info),
    PerfcountersFrontend => ("perfcounters_frontend", Info),
    ShaderPass => ("shader_pass", FileBrowser),
    ShaderPreset => ("shader_preset", FileBrowser),
    Databases => ("databases", Database),
    DatabaseCursors => ("database_cursors", Database),
    DatabasePlaylists => ("database_playlists", ContentSource),
    DatabasePlaylistsHorizontal => ("database_playlists_horizontal", ContentSource),
    DatabaseQuery => ("database_query", Database),
    DatabaseEntry => ("database_entry", Database),
    AudioFilters => ("audio_filters", FileBrowser),
    VideoFilters => ("video_filters", FileBrowser),
    CheatFiles => ("cheat_files", FileBrowser),
    RemapFiles => ("remap_files", FileBrowser),
    RecordConfigFiles => ("record_config_files", FileBrowser),
    ConfigFiles => ("config_files", FileBrowser),
    ContentHistory => ("content_history", ContentSource),
    Images => ("images", FileBrowser),
    Fonts => ("fonts", FileBrowser),
    Overlays => ("overlays", FileBrowser),
    ShaderParameters => ("shader_parameters", Info),
    ShaderParametersPreset => ("shader_parameters_preset", Info),
    SystemInfo => ("system_info", Info),
    DebugInfo => ("debug_info", Info),
    UserBindsList => ("user_binds_list", Settings),
    AccountsList => ("accounts_list", Settings),
    InputSettingsList => ("input_settings_list", Settings),
    InputHotkeyBindsList => ("input_hotkey_binds_list", Settings),
    PlaylistSettingsList => ("playlist_settings_list", Settings),
    AccountsCheevosList => ("accounts_cheevos_list", Settings),
    LoadContentList => ("load_content_list", Navigation),
    InformationList => ("information_list", Navigation),
    ContentSettings => ("content_settings", Navigation),
    Options => ("options", Navigation),
    OptionsCheats => ("options_cheats", Navigation),
    OptionsRemappings => ("options_remappings", Navigation),
    OptionsManagement => ("options_management", Navigation),
    OptionsDisk => ("options_disk", Navigation),
    OptionsShaders => ("options_shaders", Navigation),
    AddContentList => ("add_content_list", Navigation),
    ScanDirectoryList => ("scan_directory_list", FileBrowser),
    ArchiveAction => ("archive_action", Navigation),
    ArchiveActionDetectCore => ("archive_action_detect_core", Navigation),
    CoreContent => ("core_content", FileBrowser),
    DriveList => ("drive_list", FileBrowser),
}

impl std::fmt::Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a menu entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
    Action,
    Setting,
    Group,
    SubGroup,
    PlaylistEntry,
    Playlist,
    Core,
    Database,
    DatabaseCursor,
    DatabaseEntry,
    /// Read-only line of information.
    Info,
    /// Explains why a list has nothing else in it.
    Placeholder,
}

impl EntryKind {
    pub fn is_directory(self) -> bool {
        self == Self::Directory
    }
}

/// One row of a navigable list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Text shown to the user.
    pub label: String,
    /// Target path or value key.
    pub path: String,
    /// Right-aligned value text (setting value, counter, field).
    pub value: Option<String>,
    pub kind: EntryKind,
    /// List opened when the entry is activated.
    pub target: Option<ListType>,
    /// Index used for default selection (playlist position, file position).
    pub index: usize,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            value: None,
            kind,
            target: None,
            index: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the list this entry opens.
    pub fn opens(mut self, target: ListType) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

/// Ordered, append-only (until cleared) list of menu entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    entries: Vec<MenuEntry>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry built from its parts; the index defaults to the
    /// entry's position in the list.
    pub fn push(&mut self, label: impl Into<String>, path: impl Into<String>, kind: EntryKind) {
        let index = self.entries.len();
        self.entries
            .push(MenuEntry::new(label, path, kind).with_index(index));
    }

    pub fn push_entry(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    /// Move every entry of `other` onto the end of this list.
    pub fn append(&mut self, other: &mut FileList) {
        self.entries.append(&mut other.entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut Vec<MenuEntry> {
        &mut self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MenuEntry> {
        self.entries.iter()
    }

    /// Labels in rendering order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

impl From<Vec<MenuEntry>> for FileList {
    fn from(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a MenuEntry;
    type IntoIter = std::slice::Iter<'a, MenuEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
