//! The frontend driver trait and the values its hooks report.

use bitflags::bitflags;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::FileList;
use retroshell_types::paths::DefaultPaths;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

bitflags! {
    /// Hooks a driver actually implements.
    ///
    /// The runtime skips any hook whose bit is clear; a clear bit is the
    /// normal way to say "unsupported on this platform".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DriverCapabilities: u32 {
        const ENVIRONMENT = 1 << 0;
        const INIT = 1 << 1;
        const DEINIT = 1 << 2;
        const EXITSPAWN = 1 << 3;
        const PROCESS_ARGS = 1 << 4;
        const EXEC = 1 << 5;
        const SET_FORK = 1 << 6;
        const SHUTDOWN = 1 << 7;
        const GET_NAME = 1 << 8;
        const GET_OS = 1 << 9;
        const GET_RATING = 1 << 10;
        const GET_ARCHITECTURE = 1 << 11;
        const GET_POWERSTATE = 1 << 12;
        const PARSE_DRIVE_LIST = 1 << 13;
    }
}

// ---------------------------------------------------------------------------
// Reported values
// ---------------------------------------------------------------------------

/// CPU family of the running platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Unknown,
    X86,
    X86_64,
    Arm,
    Arm64,
    Mips,
    Ppc,
    Ppc64,
}

impl Architecture {
    /// Map a Rust target architecture name (`std::env::consts::ARCH`).
    pub fn from_target(arch: &str) -> Self {
        match arch {
            "x86" => Self::X86,
            "x86_64" => Self::X86_64,
            "arm" => Self::Arm,
            "aarch64" => Self::Arm64,
            "mips" | "mips64" => Self::Mips,
            "powerpc" => Self::Ppc,
            "powerpc64" => Self::Ppc64,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Arm => "ARM",
            Self::Arm64 => "ARM64",
            Self::Mips => "MIPS",
            Self::Ppc => "PPC",
            Self::Ppc64 => "PPC64",
        };
        f.write_str(name)
    }
}

/// Operating system name and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInfo {
    pub name: String,
    /// Major and minor version, when the platform reports one.
    pub version: Option<(u32, u32)>,
}

impl std::fmt::Display for OsInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.version {
            Some((major, minor)) => write!(f, "{} {major}.{minor}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Power source state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Running on battery.
    OnBattery,
    /// Plugged in and charging.
    Charging,
    /// Fully charged, on external power.
    Charged,
    /// No battery present (desktop / wall power).
    NoSource,
}

/// Snapshot of power-related information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerInfo {
    pub state: PowerState,
    /// Battery charge percentage (0-100), if known.
    pub percent: Option<u8>,
    /// Estimated seconds remaining, if known.
    pub seconds: Option<u32>,
}

/// How `exitspawn` should hand over to the next process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkMode {
    None,
    /// Restart the frontend itself.
    Core,
    /// Restart into the loader.
    Loader,
}

/// Process arguments, as seen and rewritten by `environment_settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    /// Raw argument vector, program name first.
    pub argv: Vec<String>,
    /// Content to start immediately, if any.
    pub content_path: Option<String>,
    /// Explicit configuration file.
    pub config_path: Option<String>,
    pub verbose: bool,
}

impl LaunchArgs {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            ..Self::default()
        }
    }

    /// Drop every argument (no auto-start content).
    pub fn clear(&mut self) {
        self.argv.clear();
        self.content_path = None;
    }
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Platform lifecycle hooks.
///
/// Every method has a no-op or "unsupported" default. Implementors override
/// what their platform supports and advertise it in
/// [`capabilities`](FrontendDriver::capabilities).
pub trait FrontendDriver {
    /// Registry name (`"desktop"`, `"ctr"`, `"null"`).
    fn ident(&self) -> &'static str;

    /// Hooks this driver implements.
    fn capabilities(&self) -> DriverCapabilities;

    /// Compute default locations. Called once, before any path is read.
    /// Returning `None` selects the built-in defaults.
    fn environment_settings(&mut self, _args: &mut LaunchArgs) -> Option<DefaultPaths> {
        None
    }

    /// Inspect the launch arguments after the environment is set up.
    fn process_args(&mut self, _args: &mut LaunchArgs) {}

    /// Acquire platform subsystems. Non-critical failures must degrade
    /// instead of returning an error.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release whatever `init` acquired. Must tolerate partial init and
    /// repeated calls.
    fn deinit(&mut self) {}

    /// Graceful exit or restart signal.
    fn shutdown(&mut self, _restart: bool) {}

    /// Launch the next process after the frontend exits.
    fn exitspawn(&mut self, _core_path: &str) {}

    /// Replace the running process with `path`.
    fn exec(&mut self, path: &str, _should_load_content: bool) -> Result<()> {
        Err(ShellError::Unsupported(format!("exec {path}")))
    }

    /// Choose how `exitspawn` hands over. Returns whether the mode applies.
    fn set_fork(&mut self, _mode: ForkMode) -> bool {
        false
    }

    /// Human-readable device name.
    fn name(&self) -> Option<String> {
        None
    }

    fn os(&self) -> Option<OsInfo> {
        None
    }

    /// Capability class; higher is more capable.
    fn rating(&self) -> Option<i32> {
        None
    }

    fn architecture(&self) -> Architecture {
        Architecture::Unknown
    }

    fn power_state(&self) -> Option<PowerInfo> {
        None
    }

    /// Append storage roots to `list` as directory entries.
    fn parse_drive_list(&self, _list: &mut FileList) -> Result<()> {
        Ok(())
    }
}
