//! History and playlist screens.

use retroshell_types::error::Result;
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};
use retroshell_types::paths::base_name;

use crate::dispatch::Dispatcher;
use crate::request::DisplaylistRequest;
use crate::sources::{PLAYLIST_EXT, PlaylistItem, Sources};

/// Playlist backing the history screens.
pub const HISTORY_PLAYLIST: &str = "content_history";

fn push_items(list: &mut FileList, name: &str, items: &[PlaylistItem]) {
    for (position, item) in items.iter().enumerate() {
        let mut entry = MenuEntry::new(item.display_label(), &item.path, EntryKind::PlaylistEntry)
            .opens(ListType::HorizontalContentActions)
            .with_index(position);
        if !item.core_name.is_empty() {
            entry = entry.with_value(item.core_name.as_str());
        }
        list.push_entry(entry);
    }
    log::debug!("playlist {name}: {} entries", items.len());
}

fn show(name: &str, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let items = sources.playlists()?.playlist(name)?;
    push_items(list, name, &items);
    Ok(())
}

/// Playlist name from a path or bare name, extension dropped.
fn playlist_name(source: &str) -> &str {
    let name = base_name(source);
    name.strip_suffix(PLAYLIST_EXT)
        .and_then(|n| n.strip_suffix('.'))
        .unwrap_or(name)
}

fn build_history(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    show(HISTORY_PLAYLIST, sources, list)
}

fn build_collection(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let source = if request.path.is_empty() { &request.label } else { &request.path };
    show(playlist_name(source), sources, list)
}

fn build_horizontal(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    show(playlist_name(&request.label), sources, list)
}

fn playlist_names(sources: &Sources<'_>, target: ListType, list: &mut FileList) -> Result<()> {
    for name in sources.playlists()?.playlists()? {
        let index = list.len();
        list.push_entry(
            MenuEntry::new(name.as_str(), name.as_str(), EntryKind::Playlist)
                .opens(target)
                .with_index(index),
        );
    }
    Ok(())
}

fn build_database_playlists(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    playlist_names(sources, ListType::PlaylistCollection, list)
}

fn build_database_playlists_horizontal(
    _: &DisplaylistRequest,
    sources: &Sources<'_>,
    list: &mut FileList,
) -> Result<()> {
    playlist_names(sources, ListType::Horizontal, list)
}

pub(super) fn register(dispatcher: &mut Dispatcher) {
    dispatcher.register(ListType::History, Box::new(build_history));
    dispatcher.register(ListType::ContentHistory, Box::new(build_history));
    dispatcher.register(ListType::PlaylistCollection, Box::new(build_collection));
    dispatcher.register(ListType::Horizontal, Box::new(build_horizontal));
    dispatcher.register(ListType::DatabasePlaylists, Box::new(build_database_playlists));
    dispatcher.register(
        ListType::DatabasePlaylistsHorizontal,
        Box::new(build_database_playlists_horizontal),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use retroshell_types::config::MenuConfig;
    use retroshell_types::error::ShellError;
    use retroshell_types::paths::DefaultPaths;

    use crate::sources::PlaylistStore;

    struct Store(HashMap<&'static str, Vec<PlaylistItem>>);

    impl PlaylistStore for Store {
        fn playlist(&self, name: &str) -> Result<Vec<PlaylistItem>> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| ShellError::Source(format!("no playlist {name}")))
        }

        fn playlists(&self) -> Result<Vec<String>> {
            let mut names: Vec<String> = self.0.keys().map(|k| k.to_string()).collect();
            names.sort();
            Ok(names)
        }
    }

    fn item(path: &str, label: &str, core: &str) -> PlaylistItem {
        PlaylistItem {
            path: path.into(),
            label: label.into(),
            core_name: core.into(),
            ..Default::default()
        }
    }

    fn store() -> Store {
        let mut playlists = HashMap::new();
        playlists.insert(
            HISTORY_PLAYLIST,
            vec![item("/roms/mario.nes", "Super Mario Bros.", "Nestopia"), item("/roms/metroid.nes", "  ", "")],
        );
        playlists.insert("Nintendo - SNES", vec![item("/roms/zelda.sfc", "Zelda", "Snes9x")]);
        Store(playlists)
    }

    fn run(
        f: fn(&DisplaylistRequest, &Sources<'_>, &mut FileList) -> Result<()>,
        request: &DisplaylistRequest,
    ) -> Result<FileList> {
        let paths = DefaultPaths::builtin();
        let config = MenuConfig::default();
        let store = store();
        let mut sources = Sources::new(&paths, &config);
        sources.playlists = Some(&store);
        let mut list = FileList::new();
        f(request, &sources, &mut list)?;
        Ok(list)
    }

    #[test]
    fn history_entries_open_content_actions() {
        let list = run(build_history, &DisplaylistRequest::new(ListType::History)).unwrap();
        assert_eq!(list.labels(), ["Super Mario Bros.", "metroid.nes"]);
        let first = list.get(0).unwrap();
        assert_eq!(first.target, Some(ListType::HorizontalContentActions));
        assert_eq!(first.value.as_deref(), Some("Nestopia"));
        assert!(list.get(1).unwrap().value.is_none());
        assert_eq!(list.get(1).unwrap().index, 1);
    }

    #[test]
    fn collection_from_playlist_path() {
        let req = DisplaylistRequest::new(ListType::PlaylistCollection)
            .with_path("/playlists/Nintendo - SNES.lpl");
        assert_eq!(run(build_collection, &req).unwrap().labels(), ["Zelda"]);
    }

    #[test]
    fn horizontal_uses_label() {
        let req = DisplaylistRequest::new(ListType::Horizontal).with_label("Nintendo - SNES");
        assert_eq!(run(build_horizontal, &req).unwrap().len(), 1);
    }

    #[test]
    fn unknown_playlist_is_error() {
        let req = DisplaylistRequest::new(ListType::Horizontal).with_label("Sega - Saturn");
        assert!(run(build_horizontal, &req).is_err());
    }

    #[test]
    fn database_playlists_list_names() {
        let list = run(build_database_playlists, &DisplaylistRequest::new(ListType::DatabasePlaylists)).unwrap();
        assert_eq!(list.labels(), ["Nintendo - SNES", HISTORY_PLAYLIST]);
        assert!(list.iter().all(|e| e.target == Some(ListType::PlaylistCollection)));

        let list = run(
            build_database_playlists_horizontal,
            &DisplaylistRequest::new(ListType::DatabasePlaylistsHorizontal),
        )
        .unwrap();
        assert!(list.iter().all(|e| e.target == Some(ListType::Horizontal)));
    }

    #[test]
    fn playlist_name_strips_extension() {
        assert_eq!(playlist_name("/x/Nintendo - NES.lpl"), "Nintendo - NES");
        assert_eq!(playlist_name("history"), "history");
    }
}
