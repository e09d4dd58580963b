//! File browser screens over the virtual file system.

use retroshell_platform::DriverCapabilities;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};
use retroshell_types::paths::{DefaultPaths, extension, join_dir};
use retroshell_vfs::{FileKind, Vfs, join};

use crate::dispatch::{Dispatcher, Strategy};
use crate::request::{DisplaylistRequest, split_exts};
use crate::sources::Sources;

/// Label of the action that scans the directory being browsed.
pub const SCAN_THIS_DIRECTORY: &str = "<Scan This Directory>";

/// Start directory and extension filter of each browser screen.
fn defaults(list_type: ListType, paths: &DefaultPaths) -> (Option<String>, &'static str) {
    let assets = |name: &str| Some(join_dir(&paths.assets, name));
    match list_type {
        ListType::ShaderPass => (assets("shaders"), "glsl|slang|cg"),
        ListType::ShaderPreset => (assets("shaders"), "glslp|slangp|cgp"),
        ListType::AudioFilters => (assets("filters/audio"), "dsp"),
        ListType::VideoFilters => (assets("filters/video"), "filt"),
        ListType::CheatFiles => (assets("cheats"), "cht"),
        ListType::RemapFiles => (Some(paths.remap.clone()), "rmp"),
        ListType::RecordConfigFiles => (assets("records_config"), "cfg"),
        ListType::ConfigFiles => (Some(paths.port.clone()), "cfg"),
        ListType::Images => (assets("wallpapers"), "png|jpg|jpeg|bmp|tga"),
        ListType::Fonts => (assets("fonts"), "ttf|otf"),
        ListType::Overlays => (assets("overlays"), "cfg"),
        _ => (None, ""),
    }
}

/// Append the children of `dir` to `list`.
///
/// Directories open `target` again one level down. Files are kept when
/// `exts` is empty or contains their extension; `dirs_only` drops files
/// altogether. Dot-files are skipped unless `show_hidden`.
pub fn browse_directory(
    vfs: &dyn Vfs,
    dir: &str,
    exts: &[String],
    dirs_only: bool,
    show_hidden: bool,
    target: ListType,
    list: &mut FileList,
) -> Result<()> {
    for entry in vfs.readdir(dir)? {
        if !show_hidden && entry.name.starts_with('.') {
            continue;
        }
        let path = join(dir, &entry.name);
        let index = list.len();
        match entry.kind {
            FileKind::Directory => {
                list.push_entry(
                    MenuEntry::new(entry.name, path, EntryKind::Directory)
                        .opens(target)
                        .with_index(index),
                );
            },
            FileKind::File if dirs_only => {},
            FileKind::File => {
                let keep = exts.is_empty()
                    || extension(&entry.name).is_some_and(|ext| exts.contains(&ext));
                if keep {
                    list.push_entry(MenuEntry::new(entry.name, path, EntryKind::File).with_index(index));
                }
            },
        }
    }
    Ok(())
}

/// Root storage entries reported by the driver. Each root opens `target`
/// at its own path.
pub(super) fn drive_list(sources: &Sources<'_>, target: ListType, list: &mut FileList) -> Result<()> {
    let driver = sources.driver()?;
    if !driver.capabilities().contains(DriverCapabilities::PARSE_DRIVE_LIST) {
        return Err(ShellError::Unsupported(format!("{} has no drive list", driver.ident())));
    }
    let mut drives = FileList::new();
    driver.parse_drive_list(&mut drives)?;
    for mut drive in drives.entries_mut().drain(..) {
        if drive.path.is_empty() {
            drive.path = drive.label.clone();
        }
        if drive.kind.is_directory() && drive.target.is_none() {
            drive.target = Some(target);
        }
        drive.index = list.len();
        list.push_entry(drive);
    }
    Ok(())
}

fn build_drive_list(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    drive_list(sources, ListType::Default, list)
}

fn build_files(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let (default_dir, default_exts) = defaults(request.list_type, sources.paths);
    let dir = if request.path.is_empty() {
        default_dir
    } else {
        Some(request.path.clone())
    };
    let Some(dir) = dir else {
        return drive_list(sources, request.list_type, list);
    };

    let exts = if request.exts.is_empty() {
        split_exts(default_exts)
    } else {
        request.ext_list()
    };
    let dirs_only = request.list_type == ListType::ScanDirectoryList;
    if dirs_only {
        list.push_entry(MenuEntry::new(SCAN_THIS_DIRECTORY, &dir, EntryKind::Action));
    }
    browse_directory(
        sources.vfs()?,
        &dir,
        &exts,
        dirs_only,
        sources.config.show_hidden_files,
        request.list_type,
        list,
    )
}

/// Directory picker for library scans. Its scan action stays on top when the
/// folders below it are sorted.
struct ScanDirectory;

impl Strategy for ScanDirectory {
    fn build(&self, request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
        build_files(request, sources, list)
    }

    fn pinned(&self, _: &DisplaylistRequest, list: &FileList) -> usize {
        list.iter()
            .take_while(|e| e.kind == EntryKind::Action && e.label == SCAN_THIS_DIRECTORY)
            .count()
    }
}

pub(super) fn register(dispatcher: &mut Dispatcher) {
    let browsers = [
        ListType::Default,
        ListType::ShaderPass,
        ListType::ShaderPreset,
        ListType::AudioFilters,
        ListType::VideoFilters,
        ListType::CheatFiles,
        ListType::RemapFiles,
        ListType::RecordConfigFiles,
        ListType::ConfigFiles,
        ListType::Images,
        ListType::Fonts,
        ListType::Overlays,
    ];
    for list_type in browsers {
        dispatcher.register(list_type, Box::new(build_files));
    }
    dispatcher.register(ListType::ScanDirectoryList, Box::new(ScanDirectory));
    dispatcher.register(ListType::DriveList, Box::new(build_drive_list));
}
