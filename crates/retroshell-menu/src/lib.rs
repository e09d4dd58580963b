//! Displaylist engine for retroshell.
//!
//! A [`DisplaylistRequest`] names the list to show. The [`Dispatcher`] routes
//! it to the one [`Strategy`] registered for its [`ListType`], which pulls
//! entries from the backing [`Sources`] into a staging list. The dispatcher
//! then sorts, fills in a placeholder when nothing came back, and commits the
//! result to the [`NavigationStack`] in one move.
//!
//! [`ListType`]: retroshell_types::list::ListType

pub mod dispatch;
pub mod request;
pub mod settings;
pub mod sources;
pub mod stack;
pub mod strategies;

pub use dispatch::{BuildOutcome, Dispatcher, PLACEHOLDER_LABEL, Strategy, sort_entries};
pub use request::DisplaylistRequest;
pub use settings::{ParseFlags, SettingDescriptor, SettingKind, SettingsSchema};
pub use sources::{
    CoreCatalog, CoreInfo, CoreOption, DatabaseRecord, DatabaseStore, JsonPlaylistStore,
    PerfCounter, PerfCounterSource, PlaylistItem, PlaylistStore, ShaderParamSource,
    ShaderParameter, Sources,
};
pub use stack::{Frame, NavigationStack, StackState};

#[cfg(test)]
mod tests;
