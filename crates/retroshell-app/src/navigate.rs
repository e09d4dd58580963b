//! Line-driven navigation over the displaylist engine.
//!
//! Commands: an entry number activates it, `b` goes back, `r` rebuilds the
//! visible list, `q` quits.

use std::io::{BufRead, Write};

use anyhow::Result;
use retroshell_menu::{Dispatcher, DisplaylistRequest, Frame, NavigationStack, Sources};
use retroshell_types::list::{ListCategory, ListType, MenuEntry};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Activate(usize),
    Back,
    Refresh,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "b" | "back" => Self::Back,
            "r" | "refresh" => Self::Refresh,
            "q" | "quit" => Self::Quit,
            _ => line.parse().map_or(Self::Unknown, Self::Activate),
        }
    }
}

/// Request that opens `target` from `entry`, shown in a frame built from
/// `parent`.
pub fn request_for(entry: &MenuEntry, target: ListType, parent: &DisplaylistRequest) -> DisplaylistRequest {
    let request = DisplaylistRequest::open(target);
    let request = match target {
        ListType::SettingsAll | ListType::Horizontal => request.with_label(entry.path.as_str()),
        ListType::DatabaseEntry => request
            .with_path(entry.path.as_str())
            .with_label(entry.label.as_str()),
        // Descending keeps the core and its filter.
        ListType::CoreContent if parent.list_type == ListType::CoreContent => request
            .with_path(entry.path.as_str())
            .with_path_b(parent.path_b.as_str())
            .with_exts(parent.exts.as_str()),
        ListType::CoreContent => request.with_path_b(entry.path.as_str()),
        _ if target.category() == ListCategory::FileBrowser && target == parent.list_type => request
            .with_path(entry.path.as_str())
            .with_exts(parent.exts.as_str()),
        _ => request
            .with_path(entry.path.as_str())
            .with_label(entry.label.as_str()),
    };
    match target {
        ListType::Cores | ListType::DatabasePlaylists => request.sorted(),
        _ => request,
    }
}

/// Navigation state for one session.
pub struct Session {
    dispatcher: Dispatcher,
    stack: NavigationStack,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            stack: NavigationStack::new(),
        }
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn open(&mut self, request: &DisplaylistRequest, sources: &Sources<'_>) -> Result<()> {
        self.dispatcher.build(request, sources, &mut self.stack)?;
        Ok(())
    }

    /// Apply one command. Returns `false` when the session should end.
    pub fn handle(&mut self, command: Command, sources: &Sources<'_>, out: &mut impl Write) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Back => {
                if self.stack.depth() > 1 {
                    self.stack.pop()?;
                } else {
                    writeln!(out, "Already at the top menu.")?;
                }
            },
            Command::Refresh => {
                self.dispatcher.refresh_top(sources, &mut self.stack)?;
            },
            Command::Activate(index) => self.activate(index, sources, out)?,
            Command::Unknown => writeln!(out, "Commands: <number>, b, r, q")?,
        }
        Ok(true)
    }

    fn activate(&mut self, index: usize, sources: &Sources<'_>, out: &mut impl Write) -> Result<()> {
        let Some(frame) = self.stack.top() else {
            return Ok(());
        };
        let Some(entry) = frame.entries().get(index).cloned() else {
            writeln!(out, "No entry {index}.")?;
            return Ok(());
        };
        let parent = frame.request().clone();
        self.stack.select(index)?;
        match entry.target {
            Some(target) => {
                let request = request_for(&entry, target, &parent);
                log::debug!("open {target} from '{}'", entry.label);
                self.dispatcher.build(&request, sources, &mut self.stack)?;
            },
            None => {
                log::info!("Selected '{}' ({})", entry.label, entry.path);
                writeln!(out, "Selected: {}", entry.label)?;
            },
        }
        Ok(())
    }
}

/// Print the visible frame.
pub fn render(frame: &Frame, out: &mut impl Write) -> Result<()> {
    writeln!(out, "== {} ==", frame.list_type())?;
    for (i, entry) in frame.entries().iter().enumerate() {
        let marker = if i == frame.selection() { '>' } else { ' ' };
        match &entry.value {
            Some(value) => writeln!(out, "{marker}{i:>3}) {}  [{value}]", entry.label)?,
            None => writeln!(out, "{marker}{i:>3}) {}", entry.label)?,
        }
    }
    Ok(())
}

/// Read commands until `q` or end of input, redrawing after each.
pub fn run(session: &mut Session, sources: &Sources<'_>, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    if let Some(frame) = session.stack().top() {
        render(frame, out)?;
    }
    for line in input.lines() {
        let command = Command::parse(&line?);
        if !session.handle(command, sources, out)? {
            break;
        }
        if let Some(frame) = session.stack().top() {
            render(frame, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use retroshell_menu::{CoreCatalog, CoreInfo, SettingsSchema};
    use retroshell_platform::{DriverCapabilities, FrontendDriver};
    use retroshell_types::list::{EntryKind, FileList};
    use retroshell_vfs::{MemoryVfs, Vfs};
    use retroshell_types::config::MenuConfig;
    use retroshell_types::paths::DefaultPaths;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse(" 3 \n"), Command::Activate(3));
        assert_eq!(Command::parse("b"), Command::Back);
        assert_eq!(Command::parse("refresh"), Command::Refresh);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("-1"), Command::Unknown);
        assert_eq!(Command::parse("hello"), Command::Unknown);
    }

    #[test]
    fn settings_group_opened_by_name() {
        let entry = MenuEntry::new("Video", "video", retroshell_types::list::EntryKind::Group);
        let parent = DisplaylistRequest::open(ListType::Settings);
        let req = request_for(&entry, ListType::SettingsAll, &parent);
        assert_eq!(req.label, "video");
        assert!(req.need_push);
    }

    #[test]
    fn core_content_subdirectory_keeps_core() {
        let entry = MenuEntry::new("snes", "/roms/snes", retroshell_types::list::EntryKind::Directory);
        let parent = DisplaylistRequest::open(ListType::CoreContent)
            .with_path("/roms")
            .with_path_b("/cores/snes9x.so");
        let req = request_for(&entry, ListType::CoreContent, &parent);
        assert_eq!(req.path, "/roms/snes");
        assert_eq!(req.path_b, "/cores/snes9x.so");
    }

    #[test]
    fn core_entry_opens_its_content() {
        let entry = MenuEntry::new("Snes9x", "/cores/snes9x.so", retroshell_types::list::EntryKind::Core);
        let parent = DisplaylistRequest::open(ListType::Cores);
        let req = request_for(&entry, ListType::CoreContent, &parent);
        assert!(req.path.is_empty());
        assert_eq!(req.path_b, "/cores/snes9x.so");
    }

    #[test]
    fn subdirectory_keeps_extension_filter() {
        let entry = MenuEntry::new("snes", "/roms/snes", retroshell_types::list::EntryKind::Directory);
        let parent = DisplaylistRequest::open(ListType::Default).with_path("/roms").with_exts("sfc");
        let req = request_for(&entry, ListType::Default, &parent);
        assert_eq!(req.path, "/roms/snes");
        assert_eq!(req.exts, "sfc");
    }

    fn session_output(script: &str) -> (Session, String) {
        let paths = DefaultPaths::builtin();
        let config = MenuConfig::default();
        let schema = SettingsSchema::builtin().unwrap();
        let mut sources = Sources::new(&paths, &config);
        sources.settings = Some(&schema);

        let mut session = Session::new();
        session.open(&DisplaylistRequest::open(ListType::MainMenu), &sources).unwrap();
        let mut out = Vec::new();
        run(&mut session, &sources, Cursor::new(script.to_string()), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn navigate_into_settings_and_back() {
        // Settings is entry 6 of the main menu.
        let (session, out) = session_output("6\n1\nb\n");
        assert!(out.contains("== settings =="));
        assert!(out.contains("== settings_all =="));
        assert!(out.contains("Vertical Sync (V-Sync)  [ON]"));
        assert_eq!(session.stack().depth(), 2);
        assert_eq!(session.stack().top().unwrap().list_type(), ListType::Settings);
    }

    #[test]
    fn quit_stops_reading() {
        let (session, out) = session_output("q\n6\n");
        assert_eq!(session.stack().depth(), 1);
        assert!(!out.contains("== settings =="));
    }

    #[test]
    fn back_at_top_is_reported() {
        let (session, out) = session_output("b\n");
        assert!(out.contains("Already at the top menu."));
        assert_eq!(session.stack().depth(), 1);
    }

    #[test]
    fn out_of_range_entry() {
        let (_, out) = session_output("99\n");
        assert!(out.contains("No entry 99."));
    }

    #[test]
    fn action_entries_are_reported() {
        let (_, out) = session_output("10\n");
        assert!(out.contains("Selected: Quit RetroArch"));
    }

    struct SlashDriver;

    impl FrontendDriver for SlashDriver {
        fn ident(&self) -> &'static str {
            "slash"
        }

        fn capabilities(&self) -> DriverCapabilities {
            DriverCapabilities::PARSE_DRIVE_LIST
        }

        fn parse_drive_list(&self, list: &mut FileList) -> retroshell_types::error::Result<()> {
            list.push("/", "", EntryKind::Directory);
            Ok(())
        }
    }

    struct OneCore;

    impl CoreCatalog for OneCore {
        fn cores(&self) -> retroshell_types::error::Result<Vec<CoreInfo>> {
            Ok(vec![CoreInfo {
                path: "/cores/snes9x.so".into(),
                display_name: "Snes9x".into(),
                supported_extensions: vec!["sfc".into()],
                ..Default::default()
            }])
        }
    }

    #[test]
    fn browse_content_for_a_core() {
        let paths = DefaultPaths::builtin();
        let config = MenuConfig::default();
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/roms/snes").unwrap();
        vfs.write("/roms/snes/mario.sfc", b"").unwrap();
        vfs.write("/roms/snes/readme.txt", b"").unwrap();
        let mut sources = Sources::new(&paths, &config);
        sources.vfs = Some(&vfs);
        sources.driver = Some(&SlashDriver);
        sources.cores = Some(&OneCore);

        let mut session = Session::new();
        session.open(&DisplaylistRequest::open(ListType::Cores), &sources).unwrap();
        let mut out = Vec::new();
        // core, drive, roms, snes
        run(&mut session, &sources, Cursor::new("0\n0\n0\n0\n"), &mut out).unwrap();

        let top = session.stack().top().unwrap();
        assert_eq!(top.list_type(), ListType::CoreContent);
        assert_eq!(top.request().path, "/roms/snes");
        assert_eq!(top.request().path_b, "/cores/snes9x.so");
        assert_eq!(top.entries().labels(), ["mario.sfc"]);
        assert_eq!(session.stack().depth(), 5);
    }

    #[test]
    fn missing_source_shows_placeholder() {
        // Load Core without a catalog.
        let (session, out) = session_output("0\n");
        assert!(out.contains(retroshell_menu::PLACEHOLDER_LABEL));
        assert_eq!(session.stack().depth(), 2);
    }
}
