//! Bootstrap and teardown sequencing around a frontend driver.
//!
//! Order: reserve heap -> environment -> process args -> init -> (run loop)
//! -> deinit -> shutdown -> release heap -> exit. Each hook runs at most once
//! per phase and only when the driver advertises it.

use retroshell_types::config::HeapConfig;
use retroshell_types::error::{Result, ShellError};
use retroshell_types::paths::DefaultPaths;

use crate::driver::{DriverCapabilities, FrontendDriver, LaunchArgs};
use crate::heap::{HeapProvider, application_heap_size};

/// Where the runtime is in the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Created,
    Running,
    Deinitialized,
    ShutDown,
}

/// Owns the selected driver and heap provider for the process lifetime.
pub struct Frontend {
    driver: Box<dyn FrontendDriver>,
    heap: Box<dyn HeapProvider>,
    heap_config: HeapConfig,
    phase: Phase,
    paths: Option<DefaultPaths>,
    heap_base: Option<usize>,
}

impl Frontend {
    pub fn new(driver: Box<dyn FrontendDriver>, heap: Box<dyn HeapProvider>) -> Self {
        Self {
            driver,
            heap,
            heap_config: HeapConfig::default(),
            phase: Phase::Created,
            paths: None,
            heap_base: None,
        }
    }

    pub fn with_heap_config(mut self, heap_config: HeapConfig) -> Self {
        self.heap_config = heap_config;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn driver(&self) -> &dyn FrontendDriver {
        self.driver.as_ref()
    }

    pub fn driver_mut(&mut self) -> &mut dyn FrontendDriver {
        self.driver.as_mut()
    }

    /// Paths derived at bootstrap; `None` before [`bootstrap`](Self::bootstrap).
    pub fn paths(&self) -> Option<&DefaultPaths> {
        self.paths.as_ref()
    }

    pub fn heap_base(&self) -> Option<usize> {
        self.heap_base
    }

    fn has(&self, cap: DriverCapabilities) -> bool {
        let present = self.driver.capabilities().contains(cap);
        if !present {
            log::debug!("{}: hook {cap:?} absent, skipping", self.driver.ident());
        }
        present
    }

    /// Run the startup half of the lifecycle.
    ///
    /// `port_override` replaces the platform base directory the driver
    /// computes. A heap reservation failure or a critical init failure is
    /// fatal: resources are released and the error returned for the caller to
    /// take the exit path.
    pub fn bootstrap(
        &mut self,
        args: &mut LaunchArgs,
        port_override: Option<&str>,
    ) -> Result<&DefaultPaths> {
        if self.phase != Phase::Created {
            return Err(ShellError::Lifecycle(format!(
                "bootstrap called in phase {:?}",
                self.phase
            )));
        }

        let size = match self.heap.memory_report() {
            Some(report) => application_heap_size(&report, &self.heap_config),
            None => self.heap_config.heap_size,
        };
        match self.heap.reserve_heap(size) {
            Ok(base) => {
                log::debug!("Application heap: {size:#x} bytes at {base:#x}");
                self.heap_base = Some(base);
            },
            Err(e) => {
                log::error!("Heap reservation failed: {e}");
                self.heap.release_heap();
                self.phase = Phase::ShutDown;
                return Err(e);
            },
        }

        let derived = if self.has(DriverCapabilities::ENVIRONMENT) {
            self.driver.environment_settings(args)
        } else {
            None
        };
        let paths = match port_override {
            Some(port) => DefaultPaths::derive(port),
            None => derived.unwrap_or_else(DefaultPaths::builtin),
        };
        log::info!("port dir: [{}]", paths.port);

        if self.has(DriverCapabilities::PROCESS_ARGS) {
            self.driver.process_args(args);
        }

        self.phase = Phase::Running;
        if self.has(DriverCapabilities::INIT) {
            if let Err(e) = self.driver.init() {
                log::error!("{} init failed: {e}", self.driver.ident());
                self.teardown();
                self.heap.release_heap();
                self.phase = Phase::ShutDown;
                return Err(e);
            }
        }
        log::info!("Frontend driver '{}' running", self.driver.ident());

        Ok(self.paths.insert(paths))
    }

    /// Release platform subsystems. Runs the driver's deinit at most once.
    pub fn teardown(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        if self.has(DriverCapabilities::DEINIT) {
            self.driver.deinit();
        }
        self.phase = Phase::Deinitialized;
    }

    /// Deliver the shutdown signal, tearing down first if needed. Repeated
    /// signals are ignored.
    pub fn shutdown(&mut self, restart: bool) {
        if self.phase == Phase::ShutDown {
            return;
        }
        self.teardown();
        if self.has(DriverCapabilities::SHUTDOWN) {
            self.driver.shutdown(restart);
        }
        self.phase = Phase::ShutDown;
    }

    /// The sanctioned process exit path: shutdown, release the heap, exit.
    pub fn exit(mut self, code: i32) {
        self.shutdown(false);
        self.heap.release_heap();
        log::info!("Exiting with code {code}");
        self.heap.exit_process(code);
    }
}
