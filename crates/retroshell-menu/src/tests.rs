use retroshell_platform::{DriverCapabilities, FrontendDriver};
use retroshell_types::config::MenuConfig;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList, ListType};
use retroshell_types::paths::DefaultPaths;
use retroshell_vfs::{MemoryVfs, Vfs};

use crate::dispatch::{Dispatcher, PLACEHOLDER_LABEL, sort_entries};
use crate::request::DisplaylistRequest;
use crate::settings::SettingsSchema;
use crate::sources::{CoreCatalog, CoreInfo, JsonPlaylistStore, Sources};
use crate::stack::{NavigationStack, StackState};
use crate::strategies::SCAN_THIS_DIRECTORY;

struct RootDriver;

impl FrontendDriver for RootDriver {
    fn ident(&self) -> &'static str {
        "root"
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities::PARSE_DRIVE_LIST
    }

    fn parse_drive_list(&self, list: &mut FileList) -> Result<()> {
        list.push("root:/", "", EntryKind::Directory);
        Ok(())
    }
}

struct Catalog;

impl CoreCatalog for Catalog {
    fn cores(&self) -> Result<Vec<CoreInfo>> {
        Ok(["zCore", "aCore"]
            .iter()
            .map(|name| CoreInfo {
                path: format!("/cores/{name}.so"),
                display_name: name.to_string(),
                ..Default::default()
            })
            .collect())
    }
}

#[test]
fn drive_list_from_driver_root() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let mut sources = Sources::new(&paths, &config);
    sources.driver = Some(&RootDriver);
    let mut stack = NavigationStack::new();
    Dispatcher::new()
        .build(&DisplaylistRequest::open(ListType::DriveList), &sources, &mut stack)
        .unwrap();
    let entries = stack.top().unwrap().entries();
    assert_eq!(entries.len(), 1);
    let root = entries.get(0).unwrap();
    assert_eq!(root.label, "root:/");
    assert_eq!(root.kind, EntryKind::Directory);
}

#[test]
fn cores_sorted_by_label() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let mut sources = Sources::new(&paths, &config);
    sources.cores = Some(&Catalog);
    let mut stack = NavigationStack::new();
    let dispatcher = Dispatcher::new();

    dispatcher
        .build(&DisplaylistRequest::open(ListType::Cores), &sources, &mut stack)
        .unwrap();
    assert_eq!(stack.top().unwrap().entries().labels(), ["zCore", "aCore"]);

    dispatcher
        .build(&DisplaylistRequest::open(ListType::Cores).sorted(), &sources, &mut stack)
        .unwrap();
    assert_eq!(stack.top().unwrap().entries().labels(), ["aCore", "zCore"]);
}

#[test]
fn unmapped_types_show_placeholder() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let sources = Sources::new(&paths, &config);
    let dispatcher = Dispatcher::new();
    for list_type in [ListType::None, ListType::Generic] {
        assert!(!dispatcher.is_mapped(list_type));
        let mut stack = NavigationStack::new();
        let out = dispatcher
            .build(&DisplaylistRequest::open(list_type), &sources, &mut stack)
            .unwrap();
        assert!(out.placeholder);
        assert_eq!(stack.top().unwrap().entries().labels(), [PLACEHOLDER_LABEL]);
    }
}

#[test]
fn every_type_builds_without_sources() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let sources = Sources::new(&paths, &config);
    let dispatcher = Dispatcher::new();
    for list_type in ListType::ALL {
        let mut stack = NavigationStack::new();
        let out = dispatcher
            .build(&DisplaylistRequest::open(*list_type), &sources, &mut stack)
            .unwrap();
        assert!(out.entries >= 1, "{list_type} produced an empty frame");
        assert_eq!(stack.state(), StackState::SingleFrame);
    }
}

#[test]
fn every_type_but_unmapped_is_registered() {
    let dispatcher = Dispatcher::new();
    let unmapped: Vec<_> = ListType::ALL
        .iter()
        .filter(|t| !dispatcher.is_mapped(**t))
        .collect();
    assert_eq!(unmapped, [&ListType::None, &ListType::Generic]);
}

#[test]
fn browse_into_settings_group() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let schema = SettingsSchema::builtin().unwrap();
    let mut sources = Sources::new(&paths, &config);
    sources.settings = Some(&schema);
    let dispatcher = Dispatcher::new();
    let mut stack = NavigationStack::new();

    dispatcher
        .build(&DisplaylistRequest::open(ListType::MainMenu), &sources, &mut stack)
        .unwrap();
    dispatcher
        .build(&DisplaylistRequest::open(ListType::Settings), &sources, &mut stack)
        .unwrap();
    let video = stack
        .top()
        .unwrap()
        .entries()
        .iter()
        .find(|e| e.label == "Video")
        .cloned()
        .unwrap();
    let target = video.target.unwrap();
    let req = DisplaylistRequest::open(target).with_label(video.path.as_str());
    dispatcher.build(&req, &sources, &mut stack).unwrap();

    assert_eq!(stack.state(), StackState::MultiFrame);
    assert_eq!(stack.depth(), 3);
    assert!(stack.top().unwrap().entries().labels().contains(&"Vertical Sync (V-Sync)"));

    stack.pop().unwrap();
    assert_eq!(stack.top().unwrap().list_type(), ListType::Settings);
}

#[test]
fn refresh_picks_up_new_files() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let mut vfs = MemoryVfs::new();
    vfs.mkdir("/roms").unwrap();
    vfs.write("/roms/b.nes", b"").unwrap();
    let dispatcher = Dispatcher::new();
    let mut stack = NavigationStack::new();
    {
        let mut sources = Sources::new(&paths, &config);
        sources.vfs = Some(&vfs);
        dispatcher
            .build(&DisplaylistRequest::open(ListType::Default).with_path("/roms"), &sources, &mut stack)
            .unwrap();
    }
    vfs.write("/roms/a.nes", b"").unwrap();
    let mut sources = Sources::new(&paths, &config);
    sources.vfs = Some(&vfs);
    let out = dispatcher.refresh_top(&sources, &mut stack).unwrap();
    assert!(out.needs_render);
    // File browsers sort by default.
    assert_eq!(stack.top().unwrap().entries().labels(), ["a.nes", "b.nes"]);
}

#[test]
fn history_through_json_store() {
    let paths = DefaultPaths::derive("/ra/");
    let config = MenuConfig::default();
    let mut vfs = MemoryVfs::new();
    vfs.mkdir(&paths.playlist).unwrap();
    let history = r#"{"items": [{"path": "/roms/mario.nes", "label": "Mario"}]}"#;
    vfs.write(&format!("{}content_history.lpl", paths.playlist), history.as_bytes())
        .unwrap();
    let store = JsonPlaylistStore::new(&vfs, paths.playlist.as_str());
    let mut sources = Sources::new(&paths, &config);
    sources.playlists = Some(&store);
    let mut stack = NavigationStack::new();
    let out = Dispatcher::new()
        .build(&DisplaylistRequest::open(ListType::History), &sources, &mut stack)
        .unwrap();
    assert!(!out.placeholder);
    let entry = stack.top().unwrap().entries().get(0).unwrap();
    assert_eq!(entry.label, "Mario");
    assert_eq!(entry.kind, EntryKind::PlaylistEntry);
}

#[test]
fn scan_action_stays_above_sorted_folders() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let mut vfs = MemoryVfs::new();
    vfs.mkdir("/roms/snes").unwrap();
    vfs.mkdir("/roms/nes").unwrap();
    let mut sources = Sources::new(&paths, &config);
    sources.vfs = Some(&vfs);
    let mut stack = NavigationStack::new();
    Dispatcher::new()
        .build(
            &DisplaylistRequest::open(ListType::ScanDirectoryList).with_path("/roms"),
            &sources,
            &mut stack,
        )
        .unwrap();
    assert_eq!(
        stack.top().unwrap().entries().labels(),
        [SCAN_THIS_DIRECTORY, "nes", "snes"]
    );
}

#[test]
fn append_replaces_lone_placeholder() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let dispatcher = Dispatcher::new();
    let mut stack = NavigationStack::new();
    {
        let sources = Sources::new(&paths, &config);
        let out = dispatcher
            .build(&DisplaylistRequest::open(ListType::Cores), &sources, &mut stack)
            .unwrap();
        assert!(out.placeholder);
    }
    let mut sources = Sources::new(&paths, &config);
    sources.cores = Some(&Catalog);
    let out = dispatcher
        .build(&DisplaylistRequest::new(ListType::Cores), &sources, &mut stack)
        .unwrap();
    assert!(!out.pushed);
    assert!(out.needs_render);
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.top().unwrap().entries().labels(), ["zCore", "aCore"]);
}

#[test]
fn core_content_without_catalog() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let mut vfs = MemoryVfs::new();
    vfs.mkdir("/roms").unwrap();
    vfs.write("/roms/mario.nes", b"").unwrap();
    vfs.write("/roms/notes.txt", b"").unwrap();
    let mut sources = Sources::new(&paths, &config);
    sources.vfs = Some(&vfs);
    sources.driver = Some(&RootDriver);
    let dispatcher = Dispatcher::new();
    let mut stack = NavigationStack::new();

    dispatcher
        .build(&DisplaylistRequest::open(ListType::CoreContent), &sources, &mut stack)
        .unwrap();
    assert_eq!(stack.top().unwrap().entries().labels(), ["root:/"]);

    let req = DisplaylistRequest::open(ListType::CoreContent)
        .with_path("/roms")
        .with_path_b("/cores/missing.so")
        .with_exts("nes");
    dispatcher.build(&req, &sources, &mut stack).unwrap();
    assert_eq!(stack.top().unwrap().entries().labels(), ["mario.nes"]);
}

#[test]
fn destroyed_stack_error_code() {
    let paths = DefaultPaths::builtin();
    let config = MenuConfig::default();
    let sources = Sources::new(&paths, &config);
    let mut stack = NavigationStack::new();
    stack.destroy();
    let err = Dispatcher::new()
        .build(&DisplaylistRequest::open(ListType::MainMenu), &sources, &mut stack)
        .unwrap_err();
    assert!(matches!(err, ShellError::InvalidTarget(_)));
    assert!(err.code() < 0);
}

mod prop {
    use super::*;
    use proptest::prelude::*;

    fn kind(dir: bool) -> EntryKind {
        if dir { EntryKind::Directory } else { EntryKind::File }
    }

    proptest! {
        #[test]
        fn sort_is_stable(items in proptest::collection::vec(("[a-cA-C]{1,2}", any::<bool>()), 0..40)) {
            let mut list = FileList::new();
            for (label, dir) in &items {
                list.push(label.as_str(), "", kind(*dir));
            }
            sort_entries(&mut list);

            let entries = list.entries();
            for pair in entries.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let key_a = (!a.kind.is_directory(), a.label.to_lowercase());
                let key_b = (!b.kind.is_directory(), b.label.to_lowercase());
                prop_assert!(key_a <= key_b);
                if key_a == key_b {
                    // Original positions survive in `index`.
                    prop_assert!(a.index < b.index);
                }
            }
        }

        #[test]
        fn sort_is_idempotent(labels in proptest::collection::vec("[a-zA-Z]{0,4}", 0..30)) {
            let mut list = FileList::new();
            for label in &labels {
                list.push(label.as_str(), "", EntryKind::File);
            }
            sort_entries(&mut list);
            let once = list.clone();
            sort_entries(&mut list);
            prop_assert_eq!(once, list);
        }
    }
}
