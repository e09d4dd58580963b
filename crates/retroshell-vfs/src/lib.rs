//! Virtual file system abstraction.
//!
//! Paths are either plain absolute paths (`/home/user`) or device-prefixed
//! (`sdmc:/3ds/code.bin`). Each device has its own root; the unprefixed tree
//! is the default device. Implementations: [`MemoryVfs`] for tests and
//! ephemeral trees, [`HostVfs`] for trees backed by host directories.

mod host;
mod memory;

pub use host::HostVfs;
pub use memory::MemoryVfs;

use std::borrow::Cow;

use retroshell_types::error::Result;

/// File or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
}

/// A directory entry returned by [`Vfs::readdir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    /// Entry name (no path separators).
    pub name: String,
    pub kind: FileKind,
    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// Metadata returned by [`Vfs::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsMetadata {
    pub kind: FileKind,
    pub size: u64,
}

/// File system operations used by drivers and displaylist strategies.
pub trait Vfs {
    /// List the direct children of a directory, sorted by name.
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>>;

    /// Read a whole file.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or replace a file. The parent directory must exist.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;

    fn stat(&self, path: &str) -> Result<VfsMetadata>;

    /// Create a directory and any missing parents.
    fn mkdir(&mut self, path: &str) -> Result<()>;

    /// Remove a file or an empty directory.
    fn remove(&mut self, path: &str) -> Result<()>;

    fn exists(&self, path: &str) -> bool;
}

/// Split `sdmc:/x/y` into (`sdmc:`, `/x/y`). Unprefixed paths get an empty
/// device.
pub fn split_device(path: &str) -> (&str, &str) {
    if let Some(colon) = path.find(':') {
        let device = &path[..colon];
        if !device.is_empty() && !device.contains('/') {
            return (&path[..=colon], &path[colon + 1..]);
        }
    }
    ("", path)
}

/// Normalize a path: keep the device prefix, ensure a leading `/`, collapse
/// `//`, strip a trailing `/` (except at a root). Returns the input unchanged
/// when already in normal form.
pub fn normalize(path: &str) -> Cow<'_, str> {
    let (device, rest) = split_device(path);
    let normal = rest.starts_with('/')
        && !rest.contains("//")
        && (rest.len() == 1 || !rest.ends_with('/'));
    if normal {
        return Cow::Borrowed(path);
    }

    let mut result = String::with_capacity(path.len() + 1);
    result.push_str(device);
    result.push('/');
    let mut prev_slash = true;
    for ch in rest.chars() {
        if ch == '/' {
            if !prev_slash {
                result.push(ch);
            }
            prev_slash = true;
        } else {
            result.push(ch);
            prev_slash = false;
        }
    }
    if result.len() > device.len() + 1 && result.ends_with('/') {
        result.pop();
    }
    Cow::Owned(result)
}

/// Parent of a normalized path. A root is its own parent.
pub fn parent(path: &str) -> &str {
    let (device, rest) = split_device(path);
    match rest.rfind('/') {
        Some(0) => &path[..device.len() + 1],
        None => path,
        Some(i) => &path[..device.len() + i],
    }
}

/// Whether a normalized path is a device (or default) root.
pub fn is_root(path: &str) -> bool {
    split_device(path).1 == "/"
}

/// Join an entry name onto a directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}
