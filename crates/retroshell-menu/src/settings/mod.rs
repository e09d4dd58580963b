//! Settings schema and the parser that flattens it into menu entries.
//!
//! The schema is a tree of [`SettingDescriptor`]s loaded from TOML. Groups
//! and subgroups hold children; every other kind is a leaf.

mod builtin;
mod parser;

pub use parser::{ParseFlags, ParseOptions, parse};

use serde::{Deserialize, Serialize};

use retroshell_types::error::Result;
use retroshell_types::list::ListType;

/// Node tag in the settings tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    Group,
    SubGroup,
    Bool,
    Uint,
    Float,
    /// Input binding; the owning user is [`SettingDescriptor::user`].
    Bind,
    Action,
}

impl SettingKind {
    /// Filter bits this kind answers to.
    pub fn capabilities(self) -> ParseFlags {
        match self {
            Self::Group => ParseFlags::GROUP | ParseFlags::ONLY_GROUP,
            Self::SubGroup => ParseFlags::SUB_GROUP | ParseFlags::ONLY_SUB_GROUP,
            Self::Bool => ParseFlags::ONLY_BOOL,
            Self::Uint => ParseFlags::ONLY_UINT,
            Self::Float => ParseFlags::ONLY_FLOAT,
            Self::Bind => ParseFlags::ONLY_BIND,
            Self::Action => ParseFlags::ACTION,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Self::Group | Self::SubGroup)
    }
}

/// One node of the settings tree. Read-only to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Stable key; groups are looked up by it.
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub kind: SettingKind,
    /// Current value rendered as text.
    #[serde(default)]
    pub value: Option<String>,
    /// User a bind belongs to.
    #[serde(default)]
    pub user: u32,
    #[serde(default)]
    pub hidden: bool,
    /// Shown only when advanced settings are enabled.
    #[serde(default)]
    pub advanced: bool,
    /// List an action opens.
    #[serde(default)]
    pub opens: Option<ListType>,
    #[serde(default)]
    pub children: Vec<SettingDescriptor>,
}

impl SettingDescriptor {
    pub fn new(name: &str, kind: SettingKind) -> Self {
        Self {
            name: name.to_string(),
            label: String::new(),
            kind,
            value: None,
            user: 0,
            hidden: false,
            advanced: false,
            opens: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SettingDescriptor>) -> Self {
        self.children = children;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    pub fn is_visible(&self, show_advanced: bool) -> bool {
        !self.hidden && (show_advanced || !self.advanced)
    }

    fn find(&self, name: &str) -> Option<&SettingDescriptor> {
        if self.kind.is_container() && self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

/// The whole settings tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSchema {
    #[serde(default, rename = "group")]
    pub groups: Vec<SettingDescriptor>,
}

impl SettingsSchema {
    pub fn new(groups: Vec<SettingDescriptor>) -> Self {
        Self { groups }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The schema shipped with the shell.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(builtin::BUILTIN_SCHEMA)
    }

    /// Find a group or subgroup by name anywhere in the tree.
    pub fn find_group(&self, name: &str) -> Option<&SettingDescriptor> {
        self.groups.iter().find_map(|g| g.find(name))
    }
}
