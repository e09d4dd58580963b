//! Settings screens: each one parses a subtree of the schema with a filter.

use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{FileList, ListType};

use crate::dispatch::{Dispatcher, Strategy};
use crate::request::DisplaylistRequest;
use crate::settings::{ParseFlags, ParseOptions, parse};
use crate::sources::Sources;

/// Where a settings screen starts parsing.
#[derive(Debug, Clone, Copy)]
enum Start {
    /// The top-level groups.
    Root,
    /// The group named by the request label (or path).
    FromRequest,
    Named(&'static str),
}

struct SettingsList {
    start: Start,
    filter: ParseFlags,
    /// Restrict binds to the request's user range.
    by_user: bool,
}

impl SettingsList {
    const fn new(start: Start, filter: ParseFlags) -> Self {
        Self {
            start,
            filter,
            by_user: false,
        }
    }
}

impl Strategy for SettingsList {
    fn build(&self, request: &DisplaylistRequest, sources: &Sources<'_>, list: &mut FileList) -> Result<()> {
        let schema = sources.settings()?;
        let options = ParseOptions {
            show_advanced: sources.config.show_advanced_settings,
            users: if self.by_user { request.range() } else { None },
        };

        let name = match self.start {
            Start::Root => {
                parse(&schema.groups, self.filter, &options, list);
                return Ok(());
            },
            Start::FromRequest if !request.label.is_empty() => request.label.as_str(),
            Start::FromRequest => request.path.as_str(),
            Start::Named(name) => name,
        };
        let group = schema
            .find_group(name)
            .ok_or_else(|| ShellError::Source(format!("no settings group '{name}'")))?;
        parse(&group.children, self.filter, &options, list);
        Ok(())
    }
}

pub(super) fn register(dispatcher: &mut Dispatcher) {
    let screens = [
        (ListType::Settings, SettingsList::new(Start::Root, ParseFlags::ONLY_GROUP)),
        (ListType::SettingsAll, SettingsList::new(Start::FromRequest, ParseFlags::NONE)),
        (
            ListType::InputSettingsList,
            SettingsList::new(
                Start::Named("input"),
                ParseFlags::GROUP
                    | ParseFlags::SUB_GROUP
                    | ParseFlags::ACTION
                    | ParseFlags::ONLY_BOOL
                    | ParseFlags::ONLY_UINT
                    | ParseFlags::ONLY_FLOAT,
            ),
        ),
        (
            ListType::InputHotkeyBindsList,
            SettingsList::new(Start::Named("input_hotkey_binds"), ParseFlags::ONLY_BIND),
        ),
        (
            ListType::UserBindsList,
            SettingsList {
                by_user: true,
                ..SettingsList::new(Start::Named("input_user_binds"), ParseFlags::ONLY_BIND)
            },
        ),
        (ListType::PlaylistSettingsList, SettingsList::new(Start::Named("playlist"), ParseFlags::NONE)),
        (ListType::AccountsList, SettingsList::new(Start::Named("accounts"), ParseFlags::ONLY_SUB_GROUP)),
        (
            ListType::AccountsCheevosList,
            SettingsList::new(Start::Named("accounts_cheevos"), ParseFlags::NONE),
        ),
    ];
    for (list_type, screen) in screens {
        dispatcher.register(list_type, Box::new(screen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroshell_types::config::MenuConfig;
    use retroshell_types::list::EntryKind;
    use retroshell_types::paths::DefaultPaths;

    use crate::settings::SettingsSchema;

    fn run(strategy: &SettingsList, request: &DisplaylistRequest, config: &MenuConfig) -> Result<FileList> {
        let schema = SettingsSchema::builtin()?;
        let paths = DefaultPaths::builtin();
        let mut sources = Sources::new(&paths, config);
        sources.settings = Some(&schema);
        let mut list = FileList::new();
        strategy.build(request, &sources, &mut list)?;
        Ok(list)
    }

    #[test]
    fn root_lists_only_groups() {
        let strategy = SettingsList::new(Start::Root, ParseFlags::ONLY_GROUP);
        let list = run(&strategy, &DisplaylistRequest::new(ListType::Settings), &MenuConfig::default()).unwrap();
        assert!(list.iter().all(|e| e.kind == EntryKind::Group));
        assert_eq!(list.labels()[..3], ["Drivers", "Video", "Audio"]);
    }

    #[test]
    fn settings_all_follows_label() {
        let strategy = SettingsList::new(Start::FromRequest, ParseFlags::NONE);
        let req = DisplaylistRequest::new(ListType::SettingsAll).with_label("audio");
        let list = run(&strategy, &req, &MenuConfig::default()).unwrap();
        assert!(list.labels().contains(&"Mute"));
        // Advanced entries stay hidden by default.
        assert!(!list.labels().contains(&"Audio Latency (ms)"));

        let config = MenuConfig {
            show_advanced_settings: true,
            ..MenuConfig::default()
        };
        let list = run(&strategy, &req, &config).unwrap();
        assert!(list.labels().contains(&"Audio Latency (ms)"));
    }

    #[test]
    fn unknown_group_is_source_error() {
        let strategy = SettingsList::new(Start::FromRequest, ParseFlags::NONE);
        let req = DisplaylistRequest::new(ListType::SettingsAll).with_label("nope");
        assert!(matches!(
            run(&strategy, &req, &MenuConfig::default()),
            Err(ShellError::Source(_))
        ));
    }

    #[test]
    fn user_binds_by_range() {
        let strategy = SettingsList {
            by_user: true,
            ..SettingsList::new(Start::Named("input_user_binds"), ParseFlags::ONLY_BIND)
        };
        let req = DisplaylistRequest::new(ListType::UserBindsList).with_range(2, 2);
        let list = run(&strategy, &req, &MenuConfig::default()).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|e| e.label.starts_with("User 2")));
    }

    #[test]
    fn input_screen_links_bind_subgroups() {
        let strategy = SettingsList::new(
            Start::Named("input"),
            ParseFlags::GROUP | ParseFlags::SUB_GROUP | ParseFlags::ONLY_BOOL,
        );
        let list = run(&strategy, &DisplaylistRequest::new(ListType::InputSettingsList), &MenuConfig::default()).unwrap();
        let hotkeys = list.iter().find(|e| e.path == "input_hotkey_binds").unwrap();
        assert_eq!(hotkeys.target, Some(ListType::InputHotkeyBindsList));
        assert!(list.iter().all(|e| !e.path.starts_with("input_player")));
    }

    #[test]
    fn missing_schema_is_source_error() {
        let paths = DefaultPaths::builtin();
        let config = MenuConfig::default();
        let strategy = SettingsList::new(Start::Root, ParseFlags::ONLY_GROUP);
        let mut list = FileList::new();
        let err = strategy
            .build(&DisplaylistRequest::new(ListType::Settings), &Sources::new(&paths, &config), &mut list)
            .unwrap_err();
        assert!(matches!(err, ShellError::Source(_)));
    }
}
