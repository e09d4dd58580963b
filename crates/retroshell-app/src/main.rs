//! retroshell desktop entry point.
//!
//! Loads the configuration, brings the frontend driver up, and browses the
//! displaylist engine from the terminal until the user quits.

mod logging;
mod navigate;

use std::path::PathBuf;

use anyhow::Result;

use retroshell_menu::{DisplaylistRequest, JsonPlaylistStore, SettingsSchema, Sources};
use retroshell_platform::{
    Frontend, FrontendDriver, LaunchArgs, SystemHeap, default_driver, find_driver,
};
use retroshell_types::config::ShellConfig;
use retroshell_types::list::ListType;
use retroshell_types::paths::DefaultPaths;
use retroshell_vfs::HostVfs;

use navigate::Session;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "RETROSHELL_CONFIG";

/// Config file from `-c`/`--config`, else from the environment.
fn config_path(argv: &[String], env: Option<String>) -> Option<PathBuf> {
    let mut iter = argv.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "-c" || arg == "--config" {
            return iter.next().map(PathBuf::from);
        }
    }
    env.map(PathBuf::from)
}

/// Driver named by the config, or the build target's default.
fn select_driver(name: Option<&str>) -> Box<dyn FrontendDriver> {
    match name {
        Some(name) => find_driver(name).unwrap_or_else(|| {
            log::warn!("Unknown frontend driver '{name}', using the default");
            default_driver()
        }),
        None => default_driver(),
    }
}

fn run_menu(driver: &dyn FrontendDriver, paths: &DefaultPaths, config: &ShellConfig) -> Result<()> {
    let vfs = HostVfs::new("/");
    let playlists = JsonPlaylistStore::new(&vfs, paths.playlist.as_str());
    let schema = SettingsSchema::builtin()?;

    let mut sources = Sources::new(paths, &config.menu);
    sources.vfs = Some(&vfs);
    sources.driver = Some(driver);
    sources.playlists = Some(&playlists);
    sources.settings = Some(&schema);

    let mut session = Session::new();
    session.open(&DisplaylistRequest::open(ListType::MainMenu), &sources)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    navigate::run(&mut session, &sources, stdin.lock(), &mut stdout)
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let config = match config_path(&argv, std::env::var(CONFIG_ENV).ok()) {
        Some(path) => ShellConfig::load(&path)?,
        None => ShellConfig::default(),
    };
    logging::init(config.log_file.as_deref())?;
    log::info!("Starting retroshell {}", env!("CARGO_PKG_VERSION"));

    let driver = select_driver(config.driver.as_deref());
    let mut frontend = Frontend::new(driver, Box::new(SystemHeap::new())).with_heap_config(config.heap);
    let mut args = LaunchArgs::new(argv);
    let paths = match frontend.bootstrap(&mut args, config.port_dir.as_deref()) {
        Ok(paths) => paths.clone(),
        Err(e) => {
            log::error!("Bootstrap failed: {e}");
            frontend.exit(e.code());
            return Ok(());
        },
    };
    if let Some(content) = &args.content_path {
        log::warn!("Content launching is not supported, ignoring {content}");
    }

    let code = match run_menu(frontend.driver(), &paths, &config) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e:#}");
            1
        },
    };
    frontend.exit(code);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn config_flag_wins_over_env() {
        let path = config_path(&argv(&["retroshell", "-c", "/etc/rs.toml"]), Some("/env.toml".into()));
        assert_eq!(path, Some(PathBuf::from("/etc/rs.toml")));
    }

    #[test]
    fn env_used_without_flag() {
        let path = config_path(&argv(&["retroshell", "game.nes"]), Some("/env.toml".into()));
        assert_eq!(path, Some(PathBuf::from("/env.toml")));
        assert!(config_path(&argv(&["retroshell"]), None).is_none());
    }

    #[test]
    fn dangling_flag_yields_nothing() {
        assert!(config_path(&argv(&["retroshell", "--config"]), None).is_none());
    }

    #[test]
    fn unknown_driver_falls_back() {
        assert_eq!(select_driver(Some("dreamcast")).ident(), "desktop");
        assert_eq!(select_driver(Some("null")).ident(), "null");
        assert_eq!(select_driver(None).ident(), "desktop");
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retroshell.toml");
        std::fs::write(
            &path,
            "driver = \"null\"\nport_dir = \"/srv/ra\"\n[menu]\nshow_hidden_files = true\n",
        )
        .unwrap();
        let config = ShellConfig::load(&path).unwrap();
        assert_eq!(config.driver.as_deref(), Some("null"));
        assert!(config.menu.show_hidden_files);
        assert!(config.menu.sort_file_lists);
    }
}
