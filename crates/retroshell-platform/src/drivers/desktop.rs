//! Hosted driver for desktop and single-board computers, built on `std`.

use retroshell_types::error::Result;
use retroshell_types::list::{EntryKind, FileList};
use retroshell_types::paths::{DefaultPaths, base_dir};

use crate::driver::{
    Architecture, DriverCapabilities, FrontendDriver, LaunchArgs, OsInfo, PowerInfo, PowerState,
};

/// Default platform driver for hosted targets.
#[derive(Debug, Default)]
pub struct DesktopDriver {
    initialized: bool,
}

impl DesktopDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// Parse `-c <file>`, `-v` and a positional content path out of `argv`.
fn parse_flags(args: &mut LaunchArgs) {
    let mut iter = args.argv.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => args.config_path = iter.next().cloned(),
            "-v" | "--verbose" => args.verbose = true,
            other if !other.starts_with('-') && args.content_path.is_none() => {
                args.content_path = Some(other.to_string());
            },
            other => log::warn!("Ignoring unknown argument {other}"),
        }
    }
}

impl FrontendDriver for DesktopDriver {
    fn ident(&self) -> &'static str {
        "desktop"
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities::ENVIRONMENT
            | DriverCapabilities::PROCESS_ARGS
            | DriverCapabilities::INIT
            | DriverCapabilities::DEINIT
            | DriverCapabilities::SHUTDOWN
            | DriverCapabilities::GET_OS
            | DriverCapabilities::GET_RATING
            | DriverCapabilities::GET_ARCHITECTURE
            | DriverCapabilities::GET_POWERSTATE
            | DriverCapabilities::PARSE_DRIVE_LIST
    }

    fn environment_settings(&mut self, _args: &mut LaunchArgs) -> Option<DefaultPaths> {
        let exe = std::env::current_exe().ok()?;
        let exe = exe.to_str()?.replace('\\', "/");
        let port = base_dir(&exe);
        if port.is_empty() {
            return None;
        }
        Some(DefaultPaths::derive(&port))
    }

    fn process_args(&mut self, args: &mut LaunchArgs) {
        parse_flags(args);
        if let Some(content) = &args.content_path {
            log::info!("Auto-start content {content}");
        }
    }

    fn init(&mut self) -> Result<()> {
        self.initialized = true;
        log::debug!("Desktop driver initialized");
        Ok(())
    }

    fn deinit(&mut self) {
        if !self.initialized {
            return;
        }
        self.initialized = false;
        log::logger().flush();
    }

    fn shutdown(&mut self, restart: bool) {
        log::info!("Desktop shutdown (restart: {restart})");
    }

    fn os(&self) -> Option<OsInfo> {
        Some(OsInfo {
            name: std::env::consts::OS.to_string(),
            version: None,
        })
    }

    fn rating(&self) -> Option<i32> {
        Some(100)
    }

    fn architecture(&self) -> Architecture {
        Architecture::from_target(std::env::consts::ARCH)
    }

    fn power_state(&self) -> Option<PowerInfo> {
        Some(PowerInfo {
            state: PowerState::NoSource,
            percent: None,
            seconds: None,
        })
    }

    fn parse_drive_list(&self, list: &mut FileList) -> Result<()> {
        if cfg!(windows) {
            for letter in b'A'..=b'Z' {
                let root = format!("{}:/", letter as char);
                if std::path::Path::new(&root).exists() {
                    list.push(root, "", EntryKind::Directory);
                }
            }
        } else {
            list.push("/", "", EntryKind::Directory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags_content_and_config() {
        let mut args = LaunchArgs::new(vec![
            "retroshell".into(),
            "-c".into(),
            "/etc/rs.toml".into(),
            "-v".into(),
            "/roms/game.sfc".into(),
        ]);
        parse_flags(&mut args);
        assert_eq!(args.config_path.as_deref(), Some("/etc/rs.toml"));
        assert!(args.verbose);
        assert_eq!(args.content_path.as_deref(), Some("/roms/game.sfc"));
    }

    #[test]
    fn parse_flags_ignores_program_name() {
        let mut args = LaunchArgs::new(vec!["retroshell".into()]);
        parse_flags(&mut args);
        assert!(args.content_path.is_none());
    }

    #[test]
    fn init_deinit_toggle() {
        let mut d = DesktopDriver::new();
        d.init().unwrap();
        assert!(d.is_initialized());
        d.deinit();
        d.deinit();
        assert!(!d.is_initialized());
    }

    #[test]
    fn drive_list_has_roots() {
        let d = DesktopDriver::new();
        let mut list = FileList::new();
        d.parse_drive_list(&mut list).unwrap();
        if !cfg!(windows) {
            assert_eq!(list.labels(), vec!["/"]);
        }
        assert!(list.iter().all(|e| e.kind == EntryKind::Directory));
    }

    #[test]
    fn reports_host_architecture() {
        let d = DesktopDriver::new();
        assert_eq!(
            d.architecture(),
            Architecture::from_target(std::env::consts::ARCH)
        );
        assert_eq!(d.power_state().unwrap().state, PowerState::NoSource);
    }

    #[test]
    fn environment_derives_from_executable_dir() {
        let mut d = DesktopDriver::new();
        let mut args = LaunchArgs::default();
        let paths = d.environment_settings(&mut args).unwrap();
        assert!(paths.core.ends_with("cores/"));
        assert!(paths.config.ends_with("retroarch.cfg"));
    }
}
