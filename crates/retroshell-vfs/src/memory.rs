//! In-memory VFS implementation.
//!
//! Used by unit tests and by drivers that stage a device tree before the
//! real storage is mounted. The whole tree lives in a `BTreeMap` keyed by
//! normalized paths, so device roots (`sdmc:/`) and the default root (`/`)
//! share one map without colliding.

use std::collections::BTreeMap;

use retroshell_types::error::{Result, ShellError};

use crate::{FileKind, Vfs, VfsEntry, VfsMetadata, is_root, normalize, parent};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A fully in-memory virtual file system.
#[derive(Debug)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, Node>,
}

impl MemoryVfs {
    /// Create a VFS holding only the default root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self { nodes }
    }

    /// Number of files and directories, roots included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Key prefix shared by every direct or indirect child of `dir`.
fn child_prefix(dir: &str) -> String {
    if is_root(dir) {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

impl Vfs for MemoryVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(ShellError::Vfs(format!("not a directory: {path}")));
            },
            None => {
                return Err(ShellError::Vfs(format!("no such directory: {path}")));
            },
        }

        let prefix = child_prefix(&path);
        let mut entries = Vec::new();
        for (key, node) in self.nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            // Direct children only.
            let rest = &key[prefix.len()..];
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            let (kind, size) = match node {
                Node::Dir => (FileKind::Directory, 0),
                Node::File(data) => (FileKind::File, data.len() as u64),
            };
            entries.push(VfsEntry {
                name: rest.to_string(),
                kind,
                size,
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(ShellError::Vfs(format!("is a directory: {path}"))),
            None => Err(ShellError::Vfs(format!("no such file: {path}"))),
        }
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        if is_root(&path) {
            return Err(ShellError::Vfs(format!("is a directory: {path}")));
        }
        let par = parent(&path);
        match self.nodes.get(par) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(ShellError::Vfs(format!("not a directory: {par}")));
            },
            None => {
                return Err(ShellError::Vfs(format!(
                    "parent directory does not exist: {par}"
                )));
            },
        }
        if let Some(Node::Dir) = self.nodes.get(path.as_ref()) {
            return Err(ShellError::Vfs(format!("is a directory: {path}")));
        }
        self.nodes
            .insert(path.into_owned(), Node::File(data.to_vec()));
        Ok(())
    }

    fn stat(&self, path: &str) -> Result<VfsMetadata> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Ok(VfsMetadata {
                kind: FileKind::File,
                size: data.len() as u64,
            }),
            Some(Node::Dir) => Ok(VfsMetadata {
                kind: FileKind::Directory,
                size: 0,
            }),
            None => Err(ShellError::Vfs(format!("no such path: {path}"))),
        }
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => return Ok(()),
            Some(Node::File(_)) => {
                return Err(ShellError::Vfs(format!("file exists: {path}")));
            },
            None => {},
        }
        let par = parent(&path).to_string();
        if par != path.as_ref() {
            self.mkdir(&par)?;
        }
        self.nodes.insert(path.into_owned(), Node::Dir);
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if is_root(&path) {
            return Err(ShellError::Vfs(format!("cannot remove root: {path}")));
        }
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {
                let prefix = child_prefix(&path);
                let has_children = self
                    .nodes
                    .range(prefix.clone()..)
                    .next()
                    .is_some_and(|(k, _)| k.starts_with(&prefix));
                if has_children {
                    return Err(ShellError::Vfs(format!("directory not empty: {path}")));
                }
            },
            Some(Node::File(_)) => {},
            None => {
                return Err(ShellError::Vfs(format!("no such path: {path}")));
            },
        }
        self.nodes.remove(path.as_ref());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(normalize(path).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_exists() {
        let vfs = MemoryVfs::new();
        assert!(vfs.exists("/"));
        assert!(!vfs.exists("sdmc:/"));
    }

    #[test]
    fn mkdir_creates_device_root() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("sdmc:/3ds").unwrap();
        assert!(vfs.exists("sdmc:/"));
        assert!(vfs.exists("sdmc:/3ds"));
        assert_eq!(vfs.stat("sdmc:").unwrap().kind, FileKind::Directory);
    }

    #[test]
    fn readdir_device_root() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("sdmc:/retroarch/cores").unwrap();
        vfs.mkdir("sdmc:/3ds").unwrap();
        vfs.write("sdmc:/boot.3dsx", b"x").unwrap();
        let names: Vec<String> = vfs
            .readdir("sdmc:/")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["3ds", "boot.3dsx", "retroarch"]);
    }

    #[test]
    fn devices_do_not_leak_into_default_root() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/home").unwrap();
        vfs.mkdir("sdmc:/3ds").unwrap();
        let entries = vfs.readdir("/").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "home");
        assert_eq!(entries[0].kind, FileKind::Directory);
    }

    #[test]
    fn write_and_read() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("sdmc:/3ds").unwrap();
        vfs.write("sdmc:/3ds/code.bin", b"hello").unwrap();
        assert_eq!(vfs.read("sdmc:/3ds/code.bin").unwrap(), b"hello");
        let meta = vfs.stat("sdmc:/3ds/code.bin").unwrap();
        assert_eq!(meta.kind, FileKind::File);
        assert_eq!(meta.size, 5);
    }

    #[test]
    fn write_requires_parent() {
        let mut vfs = MemoryVfs::new();
        assert!(vfs.write("/missing/file", b"x").is_err());
        assert!(vfs.write("sdmc:/file", b"x").is_err());
    }

    #[test]
    fn write_over_directory_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/dir").unwrap();
        assert!(vfs.write("/dir", b"x").is_err());
    }

    #[test]
    fn read_directory_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/dir").unwrap();
        assert!(vfs.read("/dir").is_err());
    }

    #[test]
    fn readdir_file_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.write("/file", b"x").unwrap();
        assert!(vfs.readdir("/file").is_err());
        assert!(vfs.readdir("/nope").is_err());
    }

    #[test]
    fn readdir_skips_grandchildren() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/a/b/c").unwrap();
        vfs.write("/a/file", b"12").unwrap();
        let entries = vfs.readdir("/a").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "b");
        assert_eq!(entries[1].name, "file");
        assert_eq!(entries[1].size, 2);
    }

    #[test]
    fn remove_non_empty_dir_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/a/b").unwrap();
        assert!(vfs.remove("/a").is_err());
        vfs.remove("/a/b").unwrap();
        vfs.remove("/a").unwrap();
        assert!(!vfs.exists("/a"));
    }

    #[test]
    fn remove_root_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("sdmc:/").unwrap();
        assert!(vfs.remove("/").is_err());
        assert!(vfs.remove("sdmc:/").is_err());
    }

    #[test]
    fn mkdir_over_file_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.write("/f", b"").unwrap();
        assert!(vfs.mkdir("/f").is_err());
    }

    #[test]
    fn mkdir_is_idempotent() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/a").unwrap();
        let count = vfs.node_count();
        vfs.mkdir("/a/").unwrap();
        assert_eq!(vfs.node_count(), count);
    }
}
