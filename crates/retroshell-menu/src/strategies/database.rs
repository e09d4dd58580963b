//! Game database screens.

use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};
use retroshell_types::paths::extension;
use retroshell_vfs::{FileKind, join};

use crate::dispatch::Dispatcher;
use crate::request::DisplaylistRequest;
use crate::sources::Sources;

/// Database file extension.
pub const DATABASE_EXT: &str = "rdb";
/// Cursor (saved query) file extension.
pub const CURSOR_EXT: &str = "dbc";

fn list_files(
    sources: &Sources<'_>,
    dir: &str,
    ext: &str,
    kind: EntryKind,
    list: &mut FileList,
) -> Result<()> {
    for entry in sources.vfs()?.readdir(dir)? {
        if entry.kind != FileKind::File || extension(&entry.name).as_deref() != Some(ext) {
            continue;
        }
        let index = list.len();
        let path = join(dir, &entry.name);
        list.push_entry(
            MenuEntry::new(entry.name, path, kind)
                .opens(ListType::DatabaseQuery)
                .with_index(index),
        );
    }
    Ok(())
}

fn build_databases(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    list_files(sources, &sources.paths.database, DATABASE_EXT, EntryKind::Database, list)
}

fn build_cursors(_: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    list_files(sources, &sources.paths.cursor, CURSOR_EXT, EntryKind::DatabaseCursor, list)
}

/// Records of the database at `path` matching the query in `path_b`.
fn build_query(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    for record in sources.databases()?.query(&request.path, &request.path_b)? {
        let index = list.len();
        list.push_entry(
            MenuEntry::new(record.name, request.path.as_str(), EntryKind::DatabaseEntry)
                .opens(ListType::DatabaseEntry)
                .with_index(index),
        );
    }
    Ok(())
}

/// Fields of the record named by the label in the database at `path`.
fn build_entry(request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
    let record = sources
        .databases()?
        .record(&request.path, &request.label)?
        .ok_or_else(|| ShellError::Source(format!("no record '{}' in {}", request.label, request.path)))?;
    for (field, value) in record.fields {
        let index = list.len();
        list.push_entry(MenuEntry::new(field, "", EntryKind::Info).with_value(value).with_index(index));
    }
    Ok(())
}

pub(super) fn register(dispatcher: &mut Dispatcher) {
    dispatcher.register(ListType::Databases, Box::new(build_databases));
    dispatcher.register(ListType::DatabaseCursors, Box::new(build_cursors));
    dispatcher.register(ListType::DatabaseQuery, Box::new(build_query));
    dispatcher.register(ListType::DatabaseEntry, Box::new(build_entry));
}
