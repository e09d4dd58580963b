//! Driver for the dual-screen ARM handheld (CTR).
//!
//! Hardware access goes through two service traits so the driver logic can
//! run anywhere: [`CtrSystem`] for graphics, console, audio and
//! configuration services, and [`CtrMemory`] for heap placement and process
//! exit. The SD card is reached through a [`Vfs`] mounted at `sdmc:`.

use bitflags::bitflags;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::list::{EntryKind, FileList};
use retroshell_types::paths::{DefaultPaths, base_dir};
use retroshell_vfs::Vfs;

use super::dspfirm::{FirmwareStatus, ensure_dsp_firmware};
use crate::driver::{Architecture, DriverCapabilities, FrontendDriver, LaunchArgs};
use crate::heap::{HeapProvider, LoaderHeaps, MemoryReport};

/// Where the homebrew launcher places the executable.
pub const EXECUTABLE_PATH: &str = "sdmc:/retroarch/test.3dsx";
/// The single storage root.
pub const SD_ROOT: &str = "sdmc:/";
/// Fixed virtual address of the application heap.
pub const HEAP_BASE: usize = 0x0800_0000;

// ---------------------------------------------------------------------------
// Hardware services
// ---------------------------------------------------------------------------

/// Platform services acquired by init and released by deinit.
pub trait CtrSystem {
    fn set_speedup(&mut self, enable: bool);
    fn gfx_init(&mut self) -> Result<()>;
    fn gfx_set_3d(&mut self, enable: bool);
    fn gfx_exit(&mut self);
    /// Put the text console on the bottom screen.
    fn console_init(&mut self) -> Result<()>;
    /// Whether the console still owns the bottom framebuffer.
    fn console_on_bottom_screen(&self) -> bool;
    fn csnd_init(&mut self) -> Result<()>;
    fn csnd_exit(&mut self);
    fn ndsp_init(&mut self) -> Result<()>;
    fn ndsp_exit(&mut self);
    fn cfgu_init(&mut self) -> Result<()>;
    fn cfgu_exit(&mut self);
    /// Model query; needs the configuration service.
    fn is_2ds(&self) -> bool;
    /// Turn the LCD backlights back on before leaving.
    fn lcd_power_on(&mut self) -> Result<()>;
    /// Block until the user presses START.
    fn wait_for_input(&mut self);
}

/// Memory and process services below the driver.
pub trait CtrMemory {
    /// Bytes in use by the process so far.
    fn mem_used(&self) -> u64;
    /// Heap sizes handed over by a loader service, if one started us.
    fn loader_heaps(&self) -> Option<LoaderHeaps>;
    /// Application memory size from the configuration page.
    fn app_memory(&self) -> u32;
    /// Map `size` bytes at `addr` (or anywhere, for the linear heap).
    fn map(&mut self, addr: Option<usize>, size: u32, linear: bool) -> Result<usize>;
    fn unmap(&mut self, addr: usize, size: u32);
    fn close_handles(&mut self);
    /// Jump back to the loader. Returns `false` if it gave no return hook.
    fn return_to_loader(&mut self) -> bool;
    fn exit_process(&mut self, code: i32);
}

bitflags! {
    /// Subsystems acquired by init.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Subsystems: u8 {
        const GFX = 1 << 0;
        const CONSOLE = 1 << 1;
        const CSND = 1 << 2;
        const NDSP = 1 << 3;
        const CFGU = 1 << 4;
    }
}

// ---------------------------------------------------------------------------
// Audio backend slots
// ---------------------------------------------------------------------------

/// Implementation bound to an audio driver name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBackend {
    Dsp,
    Csnd,
    Null,
}

/// The two audio driver names the handheld registers and what each is bound
/// to after init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSlots {
    /// Bound to the `ctr_dsp` name.
    pub dsp: AudioBackend,
    /// Bound to the `ctr_csnd` name.
    pub csnd: AudioBackend,
}

impl Default for AudioSlots {
    fn default() -> Self {
        Self {
            dsp: AudioBackend::Dsp,
            csnd: AudioBackend::Csnd,
        }
    }
}

impl AudioSlots {
    /// First usable backend, preferring the `ctr_dsp` name.
    pub fn preferred(&self) -> AudioBackend {
        if self.dsp != AudioBackend::Null {
            self.dsp
        } else {
            self.csnd
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Frontend driver for the handheld.
pub struct CtrDriver<S: CtrSystem> {
    system: S,
    sd: Box<dyn Vfs>,
    executable: String,
    acquired: Subsystems,
    audio: AudioSlots,
    firmware: Option<FirmwareStatus>,
}

impl<S: CtrSystem> CtrDriver<S> {
    pub fn new(system: S, sd: Box<dyn Vfs>) -> Self {
        Self {
            system,
            sd,
            executable: EXECUTABLE_PATH.to_string(),
            acquired: Subsystems::empty(),
            audio: AudioSlots::default(),
            firmware: None,
        }
    }

    /// Use a different executable location (and so a different port dir).
    pub fn with_executable(mut self, path: &str) -> Self {
        self.executable = path.to_string();
        self
    }

    pub fn acquired(&self) -> Subsystems {
        self.acquired
    }

    pub fn audio(&self) -> AudioSlots {
        self.audio
    }

    pub fn firmware_status(&self) -> Option<FirmwareStatus> {
        self.firmware
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    fn acquire(&mut self, which: Subsystems, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.acquired |= which;
                true
            },
            Err(e) => {
                log::warn!("{which:?} unavailable: {e}");
                false
            },
        }
    }
}

impl<S: CtrSystem> FrontendDriver for CtrDriver<S> {
    fn ident(&self) -> &'static str {
        "ctr"
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities::ENVIRONMENT
            | DriverCapabilities::INIT
            | DriverCapabilities::DEINIT
            | DriverCapabilities::SHUTDOWN
            | DriverCapabilities::GET_RATING
            | DriverCapabilities::GET_ARCHITECTURE
            | DriverCapabilities::PARSE_DRIVE_LIST
    }

    fn environment_settings(&mut self, args: &mut LaunchArgs) -> Option<DefaultPaths> {
        let port = base_dir(&self.executable);
        // Launched content is not supported yet; start at the menu.
        args.clear();
        if port.is_empty() {
            log::warn!("Executable path {} has no directory", self.executable);
            return None;
        }
        Some(DefaultPaths::derive(&port))
    }

    fn init(&mut self) -> Result<()> {
        self.system.set_speedup(true);
        let gfx = self.system.gfx_init();
        if !self.acquire(Subsystems::GFX, gfx) {
            return Err(ShellError::Driver("graphics init failed".into()));
        }
        self.system.gfx_set_3d(false);
        let console = self.system.console_init();
        self.acquire(Subsystems::CONSOLE, console);

        self.audio = AudioSlots::default();
        let csnd = self.system.csnd_init();
        if !self.acquire(Subsystems::CSND, csnd) {
            // The DSP implementation moves under the CSND name.
            self.audio = AudioSlots {
                dsp: AudioBackend::Null,
                csnd: AudioBackend::Dsp,
            };
        }

        self.firmware = Some(ensure_dsp_firmware(self.sd.as_mut()));

        let ndsp = self.system.ndsp_init();
        if !self.acquire(Subsystems::NDSP, ndsp) {
            if self.audio.dsp == AudioBackend::Dsp {
                self.audio.dsp = AudioBackend::Null;
            } else {
                self.audio.csnd = AudioBackend::Null;
            }
            log::warn!("DSP audio replaced by null backend");
        }

        let cfgu = self.system.cfgu_init();
        self.acquire(Subsystems::CFGU, cfgu);
        log::info!(
            "CTR init: {:?}, audio {:?}",
            self.acquired,
            self.audio.preferred()
        );
        Ok(())
    }

    fn deinit(&mut self) {
        let acquired = std::mem::replace(&mut self.acquired, Subsystems::empty());
        if acquired.is_empty() {
            return;
        }
        log::logger().flush();

        if acquired.contains(Subsystems::CONSOLE) && self.system.console_on_bottom_screen() {
            self.system.wait_for_input();
        }
        if acquired.contains(Subsystems::CFGU) {
            if !self.system.is_2ds() {
                if let Err(e) = self.system.lcd_power_on() {
                    log::warn!("LCD power on failed: {e}");
                }
            }
            self.system.cfgu_exit();
        }
        if acquired.contains(Subsystems::NDSP) {
            self.system.ndsp_exit();
        }
        if acquired.contains(Subsystems::CSND) {
            self.system.csnd_exit();
        }
        if acquired.contains(Subsystems::GFX) {
            self.system.gfx_exit();
        }
    }

    fn rating(&self) -> Option<i32> {
        Some(3)
    }

    fn architecture(&self) -> Architecture {
        Architecture::Arm
    }

    fn parse_drive_list(&self, list: &mut FileList) -> Result<()> {
        list.push(SD_ROOT, "", EntryKind::Directory);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Heap provider
// ---------------------------------------------------------------------------

/// Heap provider placing the application and linear heaps.
pub struct CtrHeap<M: CtrMemory> {
    memory: M,
    linear_heap_size: u32,
    heap: Option<(usize, u32)>,
    linear: Option<(usize, u32)>,
}

impl<M: CtrMemory> CtrHeap<M> {
    pub fn new(memory: M, linear_heap_size: u32) -> Self {
        Self {
            memory,
            linear_heap_size,
            heap: None,
            linear: None,
        }
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Application heap (base, size) while reserved.
    pub fn heap(&self) -> Option<(usize, u32)> {
        self.heap
    }

    /// Linear heap (base, size) while reserved.
    pub fn linear(&self) -> Option<(usize, u32)> {
        self.linear
    }
}

impl<M: CtrMemory> HeapProvider for CtrHeap<M> {
    fn memory_report(&self) -> Option<MemoryReport> {
        Some(MemoryReport {
            mem_used: self.memory.mem_used(),
            loader: self.memory.loader_heaps(),
            app_memory: self.memory.app_memory(),
        })
    }

    fn reserve_heap(&mut self, size: u32) -> Result<usize> {
        let base = self.memory.map(Some(HEAP_BASE), size, false)?;
        self.heap = Some((base, size));
        let linear = self.memory.map(None, self.linear_heap_size, true)?;
        self.linear = Some((linear, self.linear_heap_size));
        Ok(base)
    }

    fn release_heap(&mut self) {
        if let Some((base, size)) = self.linear.take() {
            self.memory.unmap(base, size);
        }
        if let Some((base, size)) = self.heap.take() {
            self.memory.unmap(base, size);
        }
    }

    fn exit_process(&mut self, code: i32) {
        self.release_heap();
        self.memory.close_handles();
        if !self.memory.return_to_loader() {
            self.memory.exit_process(code);
        }
    }
}
