//! Virtual file nodes
//!
//! A node is a stateless view over one path, local or remote, built on
//! demand by the router. Both variants expose the same operations; cross
//! backend copies are driven by the destination's backend. Operational
//! failures fold into `false` so callers can always render an outcome.

use crate::{Backend, RemotePath};
use app_adb::AdbClient;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Polymorphic file node, exactly two variants
pub enum VfsNode {
    Local(LocalNode),
    Remote(RemoteNode),
}

impl VfsNode {
    /// Route a path string to the matching node variant
    pub fn from_path(client: Arc<AdbClient>, path: &str) -> crate::Result<Self> {
        match Backend::classify(path)? {
            Backend::Local(p) => Ok(VfsNode::Local(LocalNode::new(client, p))),
            Backend::Remote(r) => Ok(VfsNode::Remote(RemoteNode::new(client, r))),
        }
    }

    /// Display name (last path segment)
    pub fn name(&self) -> String {
        match self {
            VfsNode::Local(n) => n.name(),
            VfsNode::Remote(n) => n.name(),
        }
    }

    /// Full addressable path string (scheme-prefixed for remote nodes)
    pub fn path(&self) -> String {
        match self {
            VfsNode::Local(n) => n.path_string(),
            VfsNode::Remote(n) => n.path_string(),
        }
    }

    pub fn is_dir(&self) -> bool {
        match self {
            VfsNode::Local(n) => n.is_dir(),
            VfsNode::Remote(n) => n.is_dir(),
        }
    }

    /// List children; missing or non-directory paths yield an empty list
    pub fn list(&self) -> Vec<VfsNode> {
        match self {
            VfsNode::Local(n) => n.list(),
            VfsNode::Remote(n) => n.list(),
        }
    }

    /// Rename within the same backend; refuses an existing destination
    pub fn rename_to(&self, new_path: &str) -> bool {
        match self {
            VfsNode::Local(n) => n.rename_to(new_path),
            VfsNode::Remote(n) => n.rename_to(new_path),
        }
    }

    /// Copy this node (recursively for directories) to the destination
    pub fn copy_to(&self, dest_path: &str) -> bool {
        match self {
            VfsNode::Local(n) => n.copy_to(dest_path),
            VfsNode::Remote(n) => n.copy_to(dest_path),
        }
    }

    /// Copy, then delete the source only if the copy succeeded
    pub fn move_to(&self, dest_path: &str) -> bool {
        match self {
            VfsNode::Local(n) => n.move_to(dest_path),
            VfsNode::Remote(n) => n.move_to(dest_path),
        }
    }

    /// Delete this node (recursively for directories)
    pub fn delete(&self) -> bool {
        match self {
            VfsNode::Local(n) => n.delete(),
            VfsNode::Remote(n) => n.delete(),
        }
    }
}

/// Node over a local disk path
pub struct LocalNode {
    client: Arc<AdbClient>,
    path: PathBuf,
}

impl LocalNode {
    pub fn new(client: Arc<AdbClient>, path: PathBuf) -> Self {
        Self { client, path }
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    fn list(&self) -> Vec<VfsNode> {
        let entries = match std::fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        entries
            .flatten()
            .map(|entry| {
                VfsNode::Local(LocalNode::new(Arc::clone(&self.client), entry.path()))
            })
            .collect()
    }

    fn rename_to(&self, new_path: &str) -> bool {
        let dest = Path::new(new_path);
        if !self.path.exists() || dest.exists() {
            return false;
        }

        match std::fs::rename(&self.path, dest) {
            Ok(()) => {
                tracing::info!("Renamed: {} -> {}", self.path.display(), new_path);
                true
            }
            Err(e) => {
                tracing::debug!("Rename failed for {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn copy_to(&self, dest_path: &str) -> bool {
        match Backend::classify(dest_path) {
            Ok(Backend::Remote(remote)) => self.push_tree(&self.path, &remote),
            Ok(Backend::Local(dest)) => match copy_local(&self.path, &dest) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(
                        "Copy failed: {} -> {}: {}",
                        self.path.display(),
                        dest_path,
                        e
                    );
                    false
                }
            },
            Err(e) => {
                tracing::warn!("Copy destination rejected: {}", e);
                false
            }
        }
    }

    /// Push a local subtree to the device: directories are re-created
    /// remotely first, then one push per leaf file.
    fn push_tree(&self, src: &Path, dest: &RemotePath) -> bool {
        if src.is_dir() {
            if !self.client.mkdir(&dest.serial, &dest.device_path) {
                return false;
            }

            let entries = match std::fs::read_dir(src) {
                Ok(entries) => entries,
                Err(_) => return false,
            };

            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().to_string();
                if !self.push_tree(&entry.path(), &dest.join(&name)) {
                    return false;
                }
            }
            true
        } else {
            self.client.push(src, &dest.serial, &dest.device_path)
        }
    }

    fn move_to(&self, dest_path: &str) -> bool {
        if !self.copy_to(dest_path) {
            return false;
        }
        self.delete()
    }

    fn delete(&self) -> bool {
        if !self.path.exists() {
            return false;
        }

        let result = if self.path.is_dir() {
            std::fs::remove_dir_all(&self.path)
        } else {
            std::fs::remove_file(&self.path)
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Delete failed for {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

/// Node over a device path, backed by the bridge client
pub struct RemoteNode {
    client: Arc<AdbClient>,
    remote: RemotePath,
    is_dir: OnceCell<bool>,
}

impl RemoteNode {
    pub fn new(client: Arc<AdbClient>, remote: RemotePath) -> Self {
        Self {
            client,
            remote,
            is_dir: OnceCell::new(),
        }
    }

    /// Construct with a pre-known directory flag, skipping the probe
    /// round trip (used by listings, which already probed each entry).
    pub fn with_known_dir(client: Arc<AdbClient>, remote: RemotePath, is_dir: bool) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(is_dir);
        Self {
            client,
            remote,
            is_dir: cell,
        }
    }

    fn name(&self) -> String {
        self.remote.name().to_string()
    }

    fn path_string(&self) -> String {
        self.remote.to_string()
    }

    /// Resolved lazily via one shell round trip, then cached for the
    /// node's lifetime.
    fn is_dir(&self) -> bool {
        *self.is_dir.get_or_init(|| {
            self.client
                .is_directory(&self.remote.serial, &self.remote.device_path)
        })
    }

    fn list(&self) -> Vec<VfsNode> {
        let names = self
            .client
            .list_names(&self.remote.serial, &self.remote.device_path);

        // One follow-up probe per entry; the flag is handed to the child
        // so later is_dir queries are free.
        names
            .into_iter()
            .map(|name| {
                let child = self.remote.join(&name);
                let is_dir = self.client.is_directory(&child.serial, &child.device_path);
                VfsNode::Remote(RemoteNode::with_known_dir(
                    Arc::clone(&self.client),
                    child,
                    is_dir,
                ))
            })
            .collect()
    }

    fn rename_to(&self, new_path: &str) -> bool {
        let new_remote = match RemotePath::parse(new_path) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Rename destination rejected: {}", e);
                return false;
            }
        };

        self.client.rename(
            &self.remote.serial,
            &self.remote.device_path,
            &new_remote.device_path,
        )
    }

    fn copy_to(&self, dest_path: &str) -> bool {
        match Backend::classify(dest_path) {
            Ok(Backend::Remote(dest)) => self.client.copy_between_devices(
                &self.remote.serial,
                &self.remote.device_path,
                &dest.serial,
                &dest.device_path,
            ),
            Ok(Backend::Local(dest)) => {
                if self.is_dir() {
                    if std::fs::create_dir_all(&dest).is_err() {
                        return false;
                    }

                    self.list().iter().all(|child| {
                        let child_dest = dest.join(child.name());
                        child.copy_to(&child_dest.to_string_lossy())
                    })
                } else {
                    self.client
                        .pull(&self.remote.serial, &self.remote.device_path, &dest)
                }
            }
            Err(e) => {
                tracing::warn!("Copy destination rejected: {}", e);
                false
            }
        }
    }

    fn move_to(&self, dest_path: &str) -> bool {
        if !self.copy_to(dest_path) {
            return false;
        }
        self.delete()
    }

    fn delete(&self) -> bool {
        self.client
            .delete(&self.remote.serial, &self.remote.device_path)
    }
}

/// Recursively copy a local tree. The byte-stream copy opens both ends
/// and closes them whether or not the copy succeeds; a partially written
/// destination is left as-is on failure.
fn copy_local(src: &Path, dest: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        std::fs::create_dir_all(dest)?;
        for entry in std::fs::read_dir(src)? {
            let entry = entry?;
            copy_local(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        let mut input = std::fs::File::open(src)?;
        let mut output = std::fs::File::create(dest)?;
        std::io::copy(&mut input, &mut output)?;
    }
    Ok(())
}
