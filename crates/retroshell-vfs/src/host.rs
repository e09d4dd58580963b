//! VFS backed by host directories.
//!
//! Each device prefix is mounted onto a host directory; the unprefixed tree
//! is mounted with [`HostVfs::new`]. Paths never escape their mount: `..`
//! components are rejected.

use std::fs;
use std::path::{Component, Path, PathBuf};

use retroshell_types::error::{Result, ShellError};

use crate::{FileKind, Vfs, VfsEntry, VfsMetadata, normalize, split_device};

/// A VFS that maps device roots onto host directories.
#[derive(Debug, Clone)]
pub struct HostVfs {
    mounts: Vec<(String, PathBuf)>,
}

impl HostVfs {
    /// Mount the default (unprefixed) tree at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            mounts: vec![(String::new(), root.into())],
        }
    }

    /// Mount a device (`sdmc` or `sdmc:`) at a host directory, replacing any
    /// previous mount of the same device.
    pub fn mount(mut self, device: &str, root: impl Into<PathBuf>) -> Self {
        let device = if device.ends_with(':') {
            device.to_string()
        } else {
            format!("{device}:")
        };
        self.mounts.retain(|(d, _)| *d != device);
        log::debug!("Mounted {device} on host VFS");
        self.mounts.push((device, root.into()));
        self
    }

    /// Host path for a VFS path.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let path = normalize(path);
        let (device, rest) = split_device(&path);
        let root = self
            .mounts
            .iter()
            .find(|(d, _)| d == device)
            .map(|(_, r)| r)
            .ok_or_else(|| ShellError::Vfs(format!("no mount for device: {device}")))?;
        let relative = Path::new(rest.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ShellError::Vfs(format!("path escapes mount: {path}")));
        }
        Ok(root.join(relative))
    }
}

impl Vfs for HostVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let host = self.resolve(path)?;
        let mut entries = Vec::new();
        for item in fs::read_dir(&host)? {
            let item = item?;
            let meta = item.metadata()?;
            let Ok(name) = item.file_name().into_string() else {
                log::debug!("Skipping non UTF-8 name in {}", host.display());
                continue;
            };
            let (kind, size) = if meta.is_dir() {
                (FileKind::Directory, 0)
            } else {
                (FileKind::File, meta.len())
            };
            entries.push(VfsEntry { name, kind, size });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(path)?)?)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        Ok(fs::write(self.resolve(path)?, data)?)
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let meta = fs::metadata(self.resolve(path)?)?;
        Ok(if meta.is_dir() {
            VfsMetadata {
                kind: FileKind::Directory,
                size: 0,
            }
        } else {
            VfsMetadata {
                kind: FileKind::File,
                size: meta.len(),
            }
        })
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        Ok(fs::create_dir_all(self.resolve(path)?)?)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let host = self.resolve(path)?;
        if host.is_dir() {
            fs::remove_dir(&host)?;
        } else {
            fs::remove_file(&host)?;
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.exists())
    }
}
