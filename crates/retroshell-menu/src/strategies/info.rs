//! Read-only information screens.

use retroshell_platform::{DriverCapabilities, PowerInfo, PowerState};
use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};

use crate::dispatch::Dispatcher;
use crate::request::DisplaylistRequest;
use crate::sources::{PerfCounter, ShaderParameter, Sources};

/// Help topics: id, title, body lines.
pub const HELP_TOPICS: &[(&str, &str, &[&str])] = &[
    (
        "controls",
        "Basic Menu Controls",
        &[
            "Scroll: Up / Down",
            "Confirm: A",
            "Back: B",
            "Toggle menu: Menu Toggle hotkey",
        ],
    ),
    (
        "load_content",
        "Loading Content",
        &[
            "Pick a core with Load Core first,",
            "then browse to the content with Load Content.",
            "Content can also be started from a playlist.",
        ],
    ),
    (
        "scanning",
        "Scanning For Content",
        &[
            "Scan Directory matches files against the databases",
            "and adds what it recognizes to a playlist.",
        ],
    ),
    (
        "audio_video",
        "Audio/Video Troubleshooting",
        &[
            "If audio crackles, raise Audio Latency.",
            "If video stutters, try turning Vertical Sync off.",
        ],
    ),
];

fn push_info(list: &mut FileList, label: impl Into<String>, value: Option<String>) {
    let index = list.len();
    let mut entry = MenuEntry::new(label, "", EntryKind::Info).with_index(index);
    entry.value = value;
    list.push_entry(entry);
}

fn build_info(request: &DisplaylistRequest, _: &Sources<'_>, list: &mut FileList) -> Result<()> {
    if !request.label.is_empty() {
        push_info(list, request.label.as_str(), None);
    }
    Ok(())
}

fn build_help_list(_: &DisplaylistRequest, _: &Sources<'_>, list: &mut FileList) -> Result<()> {
    for (id, title, _) in HELP_TOPICS {
        let index = list.len();
        list.push_entry(
            MenuEntry::new(*title, *id, EntryKind::Action)
                .opens(ListType::Help)
                .with_index(index),
        );
    }
    Ok(())
}

fn build_help(request: &DisplaylistRequest, _: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let (_, _, lines) = HELP_TOPICS
        .iter()
        .find(|(id, _, _)| *id == request.path)
        .ok_or_else(|| ShellError::Source(format!("no help topic '{}'", request.path)))?;
    for line in *lines {
        push_info(list, *line, None);
    }
    Ok(())
}

fn describe_power(power: PowerInfo) -> String {
    let state = match power.state {
        PowerState::OnBattery => "Discharging",
        PowerState::Charging => "Charging",
        PowerState::Charged => "Charged",
        PowerState::NoSource => "No source",
    };
    match power.percent {
        Some(percent) => format!("{state} ({percent}%)"),
        None => state.to_string(),
    }
}

fn build_system_info(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let driver = sources.driver()?;
    let caps = driver.capabilities();

    push_info(list, "Version", Some(env!("CARGO_PKG_VERSION").to_string()));
    push_info(list, "Frontend identifier", Some(driver.ident().to_string()));
    if caps.contains(DriverCapabilities::GET_NAME) {
        if let Some(name) = driver.name() {
            push_info(list, "Frontend name", Some(name));
        }
    }
    if caps.contains(DriverCapabilities::GET_OS) {
        if let Some(os) = driver.os() {
            push_info(list, "Frontend OS", Some(os.to_string()));
        }
    }
    if caps.contains(DriverCapabilities::GET_ARCHITECTURE) {
        push_info(list, "CPU architecture", Some(driver.architecture().to_string()));
    }
    if caps.contains(DriverCapabilities::GET_RATING) {
        if let Some(rating) = driver.rating() {
            push_info(list, "Frontend rating", Some(rating.to_string()));
        }
    }
    if caps.contains(DriverCapabilities::GET_POWERSTATE) {
        if let Some(power) = driver.power_state() {
            push_info(list, "Power source", Some(describe_power(power)));
        }
    }
    Ok(())
}

fn build_debug_info(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    for (role, dir) in sources.paths.directories() {
        push_info(list, format!("{role} directory"), Some(dir.to_string()));
    }
    push_info(list, "config file", Some(sources.paths.config.clone()));
    push_info(list, "file system", present(sources.vfs.is_some()));
    push_info(list, "core catalog", present(sources.cores.is_some()));
    push_info(list, "playlists", present(sources.playlists.is_some()));
    push_info(list, "databases", present(sources.databases.is_some()));
    Ok(())
}

fn present(available: bool) -> Option<String> {
    Some(if available { "yes" } else { "no" }.to_string())
}

fn push_counters(list: &mut FileList, counters: Vec<PerfCounter>) {
    for counter in counters {
        let value = format!("{} ticks, {} calls", counter.total, counter.call_count);
        let index = list.len();
        list.push_entry(
            MenuEntry::new(counter.ident.as_str(), counter.ident.as_str(), EntryKind::Info)
                .with_value(value)
                .with_index(index),
        );
    }
}

fn build_perf_core(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    push_counters(list, sources.perf()?.core_counters());
    Ok(())
}

fn build_perf_frontend(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    push_counters(list, sources.perf()?.frontend_counters());
    Ok(())
}

fn push_parameters(list: &mut FileList, parameters: Vec<ShaderParameter>) {
    for p in parameters {
        let index = list.len();
        list.push_entry(
            MenuEntry::new(p.description, p.id, EntryKind::Setting)
                .with_value(format!("{:.2} [{:.2} .. {:.2}]", p.current, p.minimum, p.maximum))
                .with_index(index),
        );
    }
}

fn build_shader_parameters(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    push_parameters(list, sources.shaders()?.parameters());
    Ok(())
}

fn build_preset_parameters(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    push_parameters(list, sources.shaders()?.preset_parameters());
    Ok(())
}

pub(super) fn register(dispatcher: &mut Dispatcher) {
    dispatcher.register(ListType::Info, Box::new(build_info));
    dispatcher.register(ListType::HelpScreenList, Box::new(build_help_list));
    dispatcher.register(ListType::Help, Box::new(build_help));
    dispatcher.register(ListType::SystemInfo, Box::new(build_system_info));
    dispatcher.register(ListType::DebugInfo, Box::new(build_debug_info));
    dispatcher.register(ListType::PerfcountersCore, Box::new(build_perf_core));
    dispatcher.register(ListType::PerfcountersFrontend, Box::new(build_perf_frontend));
    dispatcher.register(ListType::ShaderParameters, Box::new(build_shader_parameters));
    dispatcher.register(ListType::ShaderParametersPreset, Box::new(build_preset_parameters));
}
