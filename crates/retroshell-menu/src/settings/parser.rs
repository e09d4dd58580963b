//! Flatten a settings subtree into entries, in declaration order.

use std::ops::RangeInclusive;

use bitflags::bitflags;
use retroshell_types::list::{EntryKind, FileList, ListType, MenuEntry};

use super::{SettingDescriptor, SettingKind};

bitflags! {
    /// Which node kinds a parse emits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u32 {
        /// No filter: everything visible is emitted.
        const NONE = 1 << 0;
        const GROUP = 1 << 1;
        const ACTION = 1 << 2;
        const ONLY_UINT = 1 << 3;
        const ONLY_BOOL = 1 << 4;
        const ONLY_FLOAT = 1 << 5;
        const ONLY_BIND = 1 << 6;
        const ONLY_GROUP = 1 << 7;
        const ONLY_SUB_GROUP = 1 << 8;
        const SUB_GROUP = 1 << 9;
    }
}

impl ParseFlags {
    fn admits(self, kind: SettingKind) -> bool {
        self.is_empty() || self.contains(Self::NONE) || kind.capabilities().intersects(self)
    }
}

/// Parse-wide switches that do not change the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub show_advanced: bool,
    /// Keep only binds of these users.
    pub users: Option<RangeInclusive<u32>>,
}

/// Append the entries of `nodes` (and their descendants) that pass `filter`.
///
/// A group or subgroup header is emitted when it passes the filter itself or
/// when at least one of its descendants is emitted; the header always comes
/// right before its descendants. Returns the number of entries appended.
pub fn parse(
    nodes: &[SettingDescriptor],
    filter: ParseFlags,
    options: &ParseOptions,
    out: &mut FileList,
) -> usize {
    let before = out.len();
    for node in nodes {
        visit(node, filter, options, out);
    }
    out.len() - before
}

fn visit(node: &SettingDescriptor, filter: ParseFlags, options: &ParseOptions, out: &mut FileList) {
    if !node.is_visible(options.show_advanced) {
        return;
    }

    if node.kind.is_container() {
        let mut children = FileList::new();
        for child in &node.children {
            visit(child, filter, options, &mut children);
        }
        if filter.admits(node.kind) || !children.is_empty() {
            push(out, entry_for(node));
            for entry in children.entries_mut().drain(..) {
                push(out, entry);
            }
        }
        return;
    }

    if !filter.admits(node.kind) {
        return;
    }
    if node.kind == SettingKind::Bind {
        if let Some(users) = &options.users {
            if !users.contains(&node.user) {
                return;
            }
        }
    }
    push(out, entry_for(node));
}

fn push(out: &mut FileList, entry: MenuEntry) {
    let index = out.len();
    out.push_entry(entry.with_index(index));
}

fn entry_for(node: &SettingDescriptor) -> MenuEntry {
    let label = node.display_label();
    let mut entry = match node.kind {
        SettingKind::Group => MenuEntry::new(label, &node.name, EntryKind::Group).opens(ListType::SettingsAll),
        SettingKind::SubGroup => MenuEntry::new(label, &node.name, EntryKind::SubGroup),
        SettingKind::Action => MenuEntry::new(label, &node.name, EntryKind::Action),
        SettingKind::Bool | SettingKind::Uint | SettingKind::Float | SettingKind::Bind => {
            MenuEntry::new(label, &node.name, EntryKind::Setting)
        },
    };
    if let Some(value) = &node.value {
        entry = entry.with_value(value.as_str());
    }
    if let Some(target) = node.opens {
        entry = entry.opens(target);
    }
    entry
}
