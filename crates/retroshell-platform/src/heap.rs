//! Application heap budgeting and the platform heap/lifecycle provider.
//!
//! The provider is the thin layer below the driver: it reserves the working
//! memory the frontend runs in, releases it, and terminates the process.
//! Allocator internals stay behind [`HeapProvider`].

use retroshell_types::config::HeapConfig;
use retroshell_types::error::Result;

/// Heap sizes published by a homebrew loader that started the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderHeaps {
    pub linear: u32,
    pub heap: u32,
}

/// Memory figures read from the platform before the heap is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReport {
    /// Bytes already in use by the process.
    pub mem_used: u64,
    /// Present when running under a loader service.
    pub loader: Option<LoaderHeaps>,
    /// Application memory size from the system configuration page.
    pub app_memory: u32,
}

/// Size of the application heap to reserve.
///
/// Under a loader, application memory is what the loader handed over,
/// floored at `min_app_memory`; otherwise it is the system's figure. The
/// space left after the linear heap and `reserve_slack` is aligned down to
/// `page_size`, then the requested size is clamped to it and to `max_heap`.
pub fn application_heap_size(report: &MemoryReport, cfg: &HeapConfig) -> u32 {
    let app_memory: u64 = match report.loader {
        Some(loader) => {
            let handed = report.mem_used + u64::from(loader.linear) + u64::from(loader.heap);
            handed.max(u64::from(cfg.min_app_memory))
        },
        None => u64::from(report.app_memory),
    };

    let committed =
        report.mem_used + u64::from(cfg.linear_heap_size) + u64::from(cfg.reserve_slack);
    let page = u64::from(cfg.page_size.max(1));
    let available = app_memory.saturating_sub(committed) / page * page;
    let available = u32::try_from(available).unwrap_or(u32::MAX);

    cfg.heap_size.min(available).min(cfg.max_heap)
}

/// Platform primitives for the process's working memory and exit.
pub trait HeapProvider {
    /// Memory figures used to size the heap, when the platform has them.
    fn memory_report(&self) -> Option<MemoryReport> {
        None
    }

    /// Reserve the application heap; returns its base address.
    fn reserve_heap(&mut self, size: u32) -> Result<usize>;

    /// Release everything `reserve_heap` took. Safe to call more than once.
    fn release_heap(&mut self);

    /// Terminate the process. The last call on the sanctioned exit path.
    fn exit_process(&mut self, code: i32);
}

/// Provider for hosted platforms where the system allocator owns memory.
#[derive(Debug, Default)]
pub struct SystemHeap {
    reserved: Option<u32>,
}

impl SystemHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserved(&self) -> Option<u32> {
        self.reserved
    }
}

impl HeapProvider for SystemHeap {
    fn reserve_heap(&mut self, size: u32) -> Result<usize> {
        log::debug!("System allocator in use, nothing to reserve ({size:#x} requested)");
        self.reserved = Some(size);
        Ok(0)
    }

    fn release_heap(&mut self) {
        self.reserved = None;
    }

    fn exit_process(&mut self, code: i32) {
        log::logger().flush();
        std::process::exit(code);
    }
}
