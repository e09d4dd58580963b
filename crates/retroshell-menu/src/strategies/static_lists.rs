//! Fixed menus whose entries never depend on a backing store.

use retroshell_types::error::Result;
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};

use crate::dispatch::{Dispatcher, Strategy};
use crate::request::DisplaylistRequest;
use crate::sources::Sources;

struct Item {
    label: &'static str,
    opens: Option<ListType>,
}

const fn open(label: &'static str, target: ListType) -> Item {
    Item {
        label,
        opens: Some(target),
    }
}

const fn action(label: &'static str) -> Item {
    Item { label, opens: None }
}

/// A menu defined by a constant table. Entries inherit the request path so
/// the content or archive being acted on travels with them.
struct StaticMenu(&'static [Item]);

impl Strategy for StaticMenu {
    fn build(&self, request: &DisplaylistRequest, _: &Sources<'_>, list: &mut FileList) -> Result<()> {
        for item in self.0 {
            let index = list.len();
            let mut entry = match item.opens {
                Some(target) => MenuEntry::new(item.label, &request.path, EntryKind::Directory).opens(target),
                None => MenuEntry::new(item.label, &request.path, EntryKind::Action),
            };
            entry.index = index;
            list.push_entry(entry);
        }
        Ok(())
    }
}

const MAIN_MENU: &[Item] = &[
    open("Load Core", ListType::Cores),
    open("Load Content", ListType::LoadContentList),
    open("Add Content", ListType::AddContentList),
    open("History", ListType::History),
    open("Playlists", ListType::DatabasePlaylists),
    open("Online Updater", ListType::CoresUpdater),
    open("Settings", ListType::Settings),
    open("Information", ListType::InformationList),
    open("Help", ListType::HelpScreenList),
    action("Restart RetroArch"),
    action("Quit RetroArch"),
];

const LOAD_CONTENT: &[Item] = &[
    open("Start Directory", ListType::Default),
    open("Drives", ListType::DriveList),
    open("Collections", ListType::DatabasePlaylists),
];

const ADD_CONTENT: &[Item] = &[
    open("Scan Directory", ListType::ScanDirectoryList),
    open("Scan File", ListType::Default),
];

const INFORMATION: &[Item] = &[
    open("Core Information", ListType::CoreInfo),
    open("System Information", ListType::SystemInfo),
    open("Database Manager", ListType::Databases),
    open("Cursor Manager", ListType::DatabaseCursors),
    open("Frontend Counters", ListType::PerfcountersFrontend),
    open("Core Counters", ListType::PerfcountersCore),
    open("Debug Information", ListType::DebugInfo),
];

const QUICK_MENU: &[Item] = &[
    action("Resume"),
    action("Restart"),
    action("Close Content"),
    action("Take Screenshot"),
    action("Save State"),
    action("Load State"),
    open("Options", ListType::Options),
    open("Controls", ListType::OptionsRemappings),
    open("Cheats", ListType::OptionsCheats),
    open("Shaders", ListType::OptionsShaders),
    open("Disk Control", ListType::OptionsDisk),
    open("Information", ListType::CoreInfo),
];

const OPTIONS: &[Item] = &[
    open("Core Options", ListType::CoreOptions),
    open("Cheats", ListType::OptionsCheats),
    open("Controls", ListType::OptionsRemappings),
    open("Shaders", ListType::OptionsShaders),
    open("Disk Control", ListType::OptionsDisk),
    open("Management", ListType::OptionsManagement),
];

const OPTIONS_CHEATS: &[Item] = &[
    open("Load Cheat File", ListType::CheatFiles),
    action("Save Cheat File As"),
    action("Apply Changes"),
];

const OPTIONS_REMAPPINGS: &[Item] = &[
    open("Load Remap File", ListType::RemapFiles),
    action("Save Core Remap File"),
    action("Save Game Remap File"),
    open("User Binds", ListType::UserBindsList),
];

const OPTIONS_MANAGEMENT: &[Item] = &[
    open("Database Manager", ListType::Databases),
    open("Cursor Manager", ListType::DatabaseCursors),
];

const OPTIONS_DISK: &[Item] = &[
    action("Disk Index"),
    action("Disk Cycle Tray Status"),
    open("Disk Image Append", ListType::Default),
];

const OPTIONS_SHADERS: &[Item] = &[
    open("Load Shader Preset", ListType::ShaderPreset),
    open("Load Shader Pass", ListType::ShaderPass),
    open("Shader Parameters", ListType::ShaderParameters),
    open("Preset Parameters", ListType::ShaderParametersPreset),
    action("Save Shader Preset As"),
    action("Apply Shader Changes"),
];

const ARCHIVE_ACTION: &[Item] = &[action("Open Archive"), action("Load Archive")];

const ARCHIVE_ACTION_DETECT_CORE: &[Item] = &[
    action("Open Archive"),
    open("Load Archive", ListType::CoresDetected),
];

const HORIZONTAL_CONTENT_ACTIONS: &[Item] = &[
    action("Run"),
    open("Run with Core", ListType::CoresSupported),
    action("Add to Favorites"),
    open("Information", ListType::CoreInfo),
    action("Remove from Playlist"),
];

pub(super) fn register(dispatcher: &mut Dispatcher) {
    let tables: [(ListType, &'static [Item]); 14] = [
        (ListType::MainMenu, MAIN_MENU),
        (ListType::LoadContentList, LOAD_CONTENT),
        (ListType::AddContentList, ADD_CONTENT),
        (ListType::InformationList, INFORMATION),
        (ListType::ContentSettings, QUICK_MENU),
        (ListType::Options, OPTIONS),
        (ListType::OptionsCheats, OPTIONS_CHEATS),
        (ListType::OptionsRemappings, OPTIONS_REMAPPINGS),
        (ListType::OptionsManagement, OPTIONS_MANAGEMENT),
        (ListType::OptionsDisk, OPTIONS_DISK),
        (ListType::OptionsShaders, OPTIONS_SHADERS),
        (ListType::ArchiveAction, ARCHIVE_ACTION),
        (ListType::ArchiveActionDetectCore, ARCHIVE_ACTION_DETECT_CORE),
        (ListType::HorizontalContentActions, HORIZONTAL_CONTENT_ACTIONS),
    ];
    for (list_type, table) in tables {
        dispatcher.register(list_type, Box::new(StaticMenu(table)));
    }
}
