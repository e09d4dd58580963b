//! Core catalog screens.

use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};
use retroshell_types::paths::{base_name, extension};

use super::files::browse_directory;
use crate::dispatch::Dispatcher;
use crate::request::DisplaylistRequest;
use crate::sources::{CoreInfo, Sources};

fn core_entry(list: &FileList, core: &CoreInfo) -> MenuEntry {
    let entry = MenuEntry::new(core.label(), &core.path, EntryKind::Core).with_index(list.len());
    if core.system_name.is_empty() {
        entry
    } else {
        entry.with_value(core.system_name.as_str())
    }
}

fn push_core(list: &mut FileList, core: &CoreInfo) {
    let entry = core_entry(list, core);
    list.push_entry(entry);
}

/// Installed cores. Each one opens a content browser limited to what it loads.
fn build_cores(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    for core in sources.cores()?.cores()? {
        let entry = core_entry(list, &core).opens(ListType::CoreContent);
        list.push_entry(entry);
    }
    Ok(())
}

/// Cores able to run the content at `request.path`, judged by extension.
fn build_supported(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let Some(ext) = extension(&request.path) else {
        log::debug!("{}: content has no extension", request.path);
        return Ok(());
    };
    for core in sources.cores()?.cores()? {
        if core.supports_extension(&ext) {
            push_core(list, &core);
        }
    }
    Ok(())
}

/// Cores associated with a collection (playlist or database name).
fn build_collection_supported(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let source = if request.label.is_empty() { &request.path } else { &request.label };
    let name = base_name(source);
    let name = name
        .strip_suffix(".lpl")
        .or_else(|| name.strip_suffix(".rdb"))
        .unwrap_or(name);
    for core in sources.cores()?.cores()? {
        if core.databases.iter().any(|db| db == name) {
            push_core(list, &core);
        }
    }
    Ok(())
}

fn build_updater(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    for core in sources.cores()?.updater_cores()? {
        let index = list.len();
        let mut entry = MenuEntry::new(core.label(), &core.path, EntryKind::Core).with_index(index);
        if let Some(version) = &core.version {
            entry = entry.with_value(version.as_str());
        }
        list.push_entry(entry);
    }
    Ok(())
}

fn build_options(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    for option in sources.cores()?.core_options()? {
        let index = list.len();
        list.push_entry(
            MenuEntry::new(option.description, option.key, EntryKind::Setting)
                .with_value(option.value)
                .with_index(index),
        );
    }
    Ok(())
}

fn build_core_info(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let core = sources
        .cores()?
        .core_info(&request.path)?
        .ok_or_else(|| ShellError::Source(format!("no core info for '{}'", request.path)))?;

    let fields = [
        ("Core name", core.label().to_string()),
        ("System name", core.system_name.clone()),
        ("Supported extensions", core.supported_extensions.join("|")),
        ("Authors", core.authors.join(", ")),
        ("License", core.license.clone().unwrap_or_default()),
        ("Version", core.version.clone().unwrap_or_default()),
    ];
    for (label, value) in fields {
        if value.is_empty() {
            continue;
        }
        let index = list.len();
        list.push_entry(MenuEntry::new(label, "", EntryKind::Info).with_value(value).with_index(index));
    }
    Ok(())
}

/// File browser limited to what the core in `path_b` can load.
fn build_core_content(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    if request.path.is_empty() {
        return super::files::drive_list(sources, ListType::CoreContent, list);
    }
    let core = match sources.cores {
        Some(catalog) => catalog.core_info(&request.path_b)?,
        None => None,
    };
    let exts = match core {
        Some(core) => core.supported_extensions,
        None => request.ext_list(),
    };
    browse_directory(
        sources.vfs()?,
        &request.path,
        &exts,
        false,
        sources.config.show_hidden_files,
        ListType::CoreContent,
        list,
    )
}

pub(super) fn register(dispatcher: &mut Dispatcher) {
    dispatcher.register(ListType::Cores, Box::new(build_cores));
    dispatcher.register(ListType::CoresSupported, Box::new(build_supported));
    dispatcher.register(ListType::CoresDetected, Box::new(build_supported));
    dispatcher.register(ListType::CoresCollectionSupported, Box::new(build_collection_supported));
    dispatcher.register(ListType::CoresUpdater, Box::new(build_updater));
    dispatcher.register(ListType::CoreOptions, Box::new(build_options));
    dispatcher.register(ListType::CoreInfo, Box::new(build_core_info));
    dispatcher.register(ListType::CoreContent, Box::new(build_core_content));
}
