//! Request routing, ordering, placeholder fill and commit.

use std::collections::HashMap;

use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList, ListCategory, ListType, MenuEntry};

use crate::request::DisplaylistRequest;
use crate::sources::Sources;
use crate::stack::{Frame, NavigationStack};
use crate::strategies;

/// Label of the entry shown when a list has nothing in it.
pub const PLACEHOLDER_LABEL: &str = "No items.";

/// Builds the entries of one list type.
///
/// Strategies only append to `list`. An error means the backing source was
/// unavailable; the dispatcher discards whatever was appended and shows the
/// placeholder.
pub trait Strategy {
    fn build(&self, request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()>;

    /// Number of leading entries of `list` that stay in place when it is
    /// sorted.
    fn pinned(&self, _request: &DisplaylistRequest, _list: &FileList) -> usize {
        0
    }
}

impl<F> Strategy for F
where
    F: Fn(&DisplaylistRequest, &Sources<'_>, &mut FileList) -> Result<()>,
{
    fn build(&self, request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
        self(request, sources, list)
    }
}

/// What a build did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    pub list_type: ListType,
    /// Entries in the committed frame.
    pub entries: usize,
    /// A new frame was pushed.
    pub pushed: bool,
    /// The build produced nothing and the placeholder was shown.
    pub placeholder: bool,
    /// The visible frame changed and must be redrawn.
    pub needs_render: bool,
}

/// Registry of strategies keyed by list type.
pub struct Dispatcher {
    strategies: HashMap<ListType, Box<dyn Strategy>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher with every built-in strategy registered.
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        strategies::register_all(&mut dispatcher);
        dispatcher
    }

    /// Dispatcher with nothing registered; every list is the placeholder.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Register a strategy. Replaces any existing one for the same type.
    pub fn register(&mut self, list_type: ListType, strategy: Box<dyn Strategy>) {
        self.strategies.insert(list_type, strategy);
    }

    pub fn is_mapped(&self, list_type: ListType) -> bool {
        self.strategies.contains_key(&list_type)
    }

    /// Build the requested list and commit it to `stack`.
    ///
    /// Fails without touching the stack when the stack is destroyed or a
    /// request field is over-long. Everything else, including unmapped types
    /// and unavailable sources, commits a frame.
    pub fn build(
        &self,
        request: &DisplaylistRequest,
        sources: &Sources<'_>,
        stack: &mut NavigationStack,
    ) -> Result<BuildOutcome> {
        if stack.is_destroyed() {
            return Err(ShellError::InvalidTarget(format!(
                "cannot build {} into a destroyed stack",
                request.list_type
            )));
        }
        request.validate()?;

        let strategy = self.strategies.get(&request.list_type);
        let mut staging = FileList::new();
        match strategy {
            Some(strategy) => {
                if let Err(e) = strategy.build(request, sources, &mut staging) {
                    log::warn!("{}: {e}", request.list_type);
                    staging.clear();
                }
            },
            None => log::debug!("{}: no strategy registered", request.list_type),
        }

        let sort = request.need_sort || sorts_by_default(request.list_type, sources);
        let pinned = |list: &FileList| strategy.map_or(0, |s| s.pinned(request, list));
        if sort {
            let keep = pinned(&staging);
            sort_entries_from(&mut staging, keep);
        }

        let push = request.need_push || stack.top().is_none();
        // New entries take the place of a lone placeholder rather than
        // joining it.
        let over_placeholder =
            !staging.is_empty() && stack.top().is_some_and(|f| is_placeholder_only(&f.entries));
        let replace = push || request.need_refresh || over_placeholder;
        let top_empty = stack.top().is_none_or(|f| f.entries.is_empty());
        let placeholder = staging.is_empty() && (replace || top_empty);
        if placeholder {
            staging.push_entry(placeholder_entry());
        }

        let (entries, needs_render) = if push {
            reindex(&mut staging, 0);
            let mut frame = Frame::new(request.clone(), staging);
            frame.set_selection(request.directory_ptr);
            let entries = frame.entries.len();
            stack.push_frame(frame)?;
            (entries, true)
        } else {
            let Some(frame) = stack.top_mut() else {
                return Err(ShellError::InvalidTarget("no frame to update".into()));
            };
            let changed = if replace {
                reindex(&mut staging, 0);
                let changed = frame.entries != staging;
                frame.entries = staging;
                changed
            } else {
                let changed = !staging.is_empty();
                frame.entries.append(&mut staging);
                if sort && changed {
                    let keep = pinned(&frame.entries);
                    sort_entries_from(&mut frame.entries, keep);
                }
                reindex(&mut frame.entries, 0);
                changed
            };
            frame.request = request.clone();
            frame.set_selection(request.directory_ptr);
            (frame.entries.len(), changed)
        };

        log::debug!(
            "built {} ({entries} entries, push={push}, placeholder={placeholder})",
            request.list_type
        );
        Ok(BuildOutcome {
            list_type: request.list_type,
            entries,
            pushed: push,
            placeholder,
            needs_render,
        })
    }

    /// Rebuild the visible frame from the request it was built with, keeping
    /// the current selection.
    pub fn refresh_top(&self, sources: &Sources<'_>, stack: &mut NavigationStack) -> Result<BuildOutcome> {
        if stack.is_destroyed() {
            return Err(ShellError::InvalidTarget("navigation stack destroyed".into()));
        }
        let Some(top) = stack.top() else {
            return Err(ShellError::InvalidTarget("no frame to refresh".into()));
        };
        let mut request = top.request.clone();
        request.need_push = false;
        request.need_refresh = true;
        request.directory_ptr = top.selection;
        self.build(&request, sources, stack)
    }
}

fn sorts_by_default(list_type: ListType, sources: &Sources<'_>) -> bool {
    sources.config.sort_file_lists && list_type.category() == ListCategory::FileBrowser
}

fn is_placeholder_only(list: &FileList) -> bool {
    list.len() == 1 && list.get(0).is_some_and(|e| e.kind == EntryKind::Placeholder)
}

fn placeholder_entry() -> MenuEntry {
    MenuEntry::new(PLACEHOLDER_LABEL, "", EntryKind::Placeholder)
}

fn reindex(list: &mut FileList, start: usize) {
    for (i, entry) in list.entries_mut().iter_mut().enumerate() {
        entry.index = start + i;
    }
}

/// Stable, case-insensitive sort by label with directories first.
///
/// Entries with equal keys keep their insertion order.
pub fn sort_entries(list: &mut FileList) {
    sort_entries_from(list, 0);
}

/// Sort everything after the first `pinned` entries.
fn sort_entries_from(list: &mut FileList, pinned: usize) {
    let entries = list.entries_mut();
    let start = pinned.min(entries.len());
    entries[start..].sort_by_cached_key(|e| (!e.kind.is_directory(), e.label.to_lowercase()));
}
