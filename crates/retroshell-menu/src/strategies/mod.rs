//! Built-in list strategies, one module per backing store.

mod cores;
mod database;
mod files;
mod info;
mod playlists;
mod settings;
mod static_lists;

use crate::dispatch::Dispatcher;

/// Register every built-in strategy.
///
/// `None` and `Generic` stay unmapped and always show the placeholder.
pub fn register_all(dispatcher: &mut Dispatcher) {
    static_lists::register(dispatcher);
    settings::register(dispatcher);
    cores::register(dispatcher);
    playlists::register(dispatcher);
    database::register(dispatcher);
    files::register(dispatcher);
    info::register(dispatcher);
}

pub use files::{SCAN_THIS_DIRECTORY, browse_directory};
pub use info::HELP_TOPICS;
