//! The value object describing which list to build.

use retroshell_types::PATH_MAX_LENGTH;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::ListType;

/// Everything a strategy needs to know to build one list.
///
/// `list_type` decides which of the other fields mean anything; the rest stay
/// empty or zero and are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaylistRequest {
    pub list_type: ListType,
    /// Primary path: a directory, content file, playlist or database.
    pub path: String,
    /// Secondary path (the core for a core-content browser).
    pub path_b: String,
    pub path_c: String,
    /// Screen label; names the settings group or playlist for some lists.
    pub label: String,
    /// `|`-separated extension filter for file browsers.
    pub exts: String,
    /// Numeric selector, e.g. the first user of a bind range.
    pub type_id: u32,
    /// Upper end of the selector range, 0 when unused.
    pub type_default: u32,
    /// Entry to select once the frame is committed.
    pub directory_ptr: usize,
    pub need_sort: bool,
    /// Replace the target frame's contents instead of appending.
    pub need_refresh: bool,
    /// Push a new frame instead of updating the top one.
    pub need_push: bool,
}

impl DisplaylistRequest {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            path: String::new(),
            path_b: String::new(),
            path_c: String::new(),
            label: String::new(),
            exts: String::new(),
            type_id: 0,
            type_default: 0,
            directory_ptr: 0,
            need_sort: false,
            need_refresh: false,
            need_push: false,
        }
    }

    /// A request that opens `list_type` as a new, freshly built frame.
    pub fn open(list_type: ListType) -> Self {
        Self::new(list_type).push().refresh()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_path_b(mut self, path: impl Into<String>) -> Self {
        self.path_b = path.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_exts(mut self, exts: impl Into<String>) -> Self {
        self.exts = exts.into();
        self
    }

    pub fn with_range(mut self, type_id: u32, type_default: u32) -> Self {
        self.type_id = type_id;
        self.type_default = type_default;
        self
    }

    pub fn select(mut self, directory_ptr: usize) -> Self {
        self.directory_ptr = directory_ptr;
        self
    }

    pub fn sorted(mut self) -> Self {
        self.need_sort = true;
        self
    }

    pub fn refresh(mut self) -> Self {
        self.need_refresh = true;
        self
    }

    pub fn push(mut self) -> Self {
        self.need_push = true;
        self
    }

    /// Reject requests whose text fields exceed the path bound.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("path", &self.path),
            ("path_b", &self.path_b),
            ("path_c", &self.path_c),
            ("label", &self.label),
            ("exts", &self.exts),
        ];
        for (name, value) in fields {
            if value.len() > PATH_MAX_LENGTH {
                return Err(ShellError::InvalidRequest(format!(
                    "{name} is {} bytes, limit is {PATH_MAX_LENGTH}",
                    value.len()
                )));
            }
        }
        Ok(())
    }

    /// The extension filter as lower-case entries, empty when unfiltered.
    pub fn ext_list(&self) -> Vec<String> {
        split_exts(&self.exts)
    }

    /// Inclusive selector range, `None` when `type_default` is unset.
    pub fn range(&self) -> Option<std::ops::RangeInclusive<u32>> {
        (self.type_default != 0).then(|| self.type_id..=self.type_default.max(self.type_id))
    }
}

/// Split a `|`-separated extension list, dropping empties and dots.
pub fn split_exts(exts: &str) -> Vec<String> {
    exts.split('|')
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
