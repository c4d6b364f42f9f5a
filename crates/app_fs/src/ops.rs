//! FileManager - the core-to-caller operation surface
//!
//! Every path argument is a plain string routed through the backend
//! classifier. Operational failures come back as `false` or empty
//! collections so the UI can always render an outcome; the only sharp
//! error is a malformed remote path, which is a programmer-error signal.

use crate::{archive, browser, fingerprint, Backend, FileSystemItem, Result, VfsNode};
use app_adb::{AdbClient, AndroidDevice};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Facade over both filesystem backends
pub struct FileManager {
    client: Arc<AdbClient>,
}

impl FileManager {
    pub fn new(client: Arc<AdbClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<AdbClient> {
        &self.client
    }

    fn node(&self, path: &str) -> Result<VfsNode> {
        VfsNode::from_path(Arc::clone(&self.client), path)
    }

    /// List the entries of a local or remote directory.
    ///
    /// Missing/non-directory local paths and failed remote listings both
    /// yield an empty list.
    pub fn list_entries(&self, path: &str) -> Result<Vec<FileSystemItem>> {
        match Backend::classify(path)? {
            Backend::Local(p) => Ok(browser::list_local(&p)),
            Backend::Remote(_) => {
                let node = self.node(path)?;
                Ok(node
                    .list()
                    .iter()
                    .map(|n| FileSystemItem::new(n.name(), n.path(), n.is_dir()))
                    .collect())
            }
        }
    }

    /// Rename. Succeeds only if the source exists and the destination
    /// does not (local); remote renames issue a device-side move.
    pub fn rename(&self, old_path: &str, new_path: &str) -> Result<bool> {
        Backend::classify(new_path)?;
        Ok(self.node(old_path)?.rename_to(new_path))
    }

    /// Copy a file or directory tree, across backends if needed
    pub fn copy(&self, src_path: &str, dest_path: &str) -> Result<bool> {
        // Reject a malformed destination up front rather than folding it
        // into an operational false
        Backend::classify(dest_path)?;
        let result = self.node(src_path)?.copy_to(dest_path);
        tracing::info!("Copy {} -> {}: {}", src_path, dest_path, result);
        Ok(result)
    }

    /// Copy then delete the source; the source is left untouched when
    /// the copy fails
    pub fn move_item(&self, src_path: &str, dest_path: &str) -> Result<bool> {
        Backend::classify(dest_path)?;
        let result = self.node(src_path)?.move_to(dest_path);
        tracing::info!("Move {} -> {}: {}", src_path, dest_path, result);
        Ok(result)
    }

    /// Delete a file or directory tree
    pub fn delete(&self, path: &str) -> Result<bool> {
        let result = self.node(path)?.delete();
        tracing::info!("Delete {}: {}", path, result);
        Ok(result)
    }

    /// Compress local inputs into a new zip archive
    pub fn compress(&self, paths: &[String], archive_path: &str) -> bool {
        let inputs: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
        archive::compress(&inputs, Path::new(archive_path))
    }

    /// List attached devices; zero devices is an empty list, not an error
    pub fn list_devices(&self) -> Vec<AndroidDevice> {
        self.client.list_devices()
    }

    /// Fingerprint a local directory for change polling
    pub fn fingerprint(&self, path: &str) -> u64 {
        fingerprint::fingerprint(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsError;
    use std::fs;

    fn manager() -> FileManager {
        FileManager::new(Arc::new(AdbClient::new(Some(PathBuf::from(
            "/nonexistent/adb",
        )))))
    }

    #[test]
    fn test_list_entries_missing_local_is_empty() {
        let fm = manager();
        assert!(fm.list_entries("/definitely/not/real").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_remote_path_is_sharp() {
        let fm = manager();
        assert!(matches!(
            fm.list_entries("adb:///sdcard"),
            Err(FsError::MalformedPath(_))
        ));
        assert!(matches!(
            fm.copy("/tmp/a", "adb:///x"),
            Err(FsError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_rename_malformed_destination_is_sharp() {
        let fm = manager();
        assert!(matches!(
            fm.rename("adb://ABC123/sdcard/a", "adb:///b"),
            Err(FsError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_copy_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("x.txt"), b"abc").unwrap();
        fs::write(src.join("sub/y.txt"), b"hello").unwrap();

        let dst = dir.path().join("dst");
        let fm = manager();
        assert!(fm
            .copy(&src.to_string_lossy(), &dst.to_string_lossy())
            .unwrap());

        assert_eq!(fs::metadata(dst.join("x.txt")).unwrap().len(), 3);
        assert_eq!(fs::metadata(dst.join("sub/y.txt")).unwrap().len(), 5);
    }

    #[test]
    fn test_copy_then_delete_equals_move() {
        let dir = tempfile::tempdir().unwrap();
        let fm = manager();

        let src_a = dir.path().join("a");
        fs::create_dir_all(&src_a).unwrap();
        fs::write(src_a.join("f.txt"), b"data").unwrap();
        let via_copy = dir.path().join("via_copy");
        assert!(fm
            .copy(&src_a.to_string_lossy(), &via_copy.to_string_lossy())
            .unwrap());
        assert!(fm.delete(&src_a.to_string_lossy()).unwrap());

        let src_b = dir.path().join("b");
        fs::create_dir_all(&src_b).unwrap();
        fs::write(src_b.join("f.txt"), b"data").unwrap();
        let via_move = dir.path().join("via_move");
        assert!(fm
            .move_item(&src_b.to_string_lossy(), &via_move.to_string_lossy())
            .unwrap());

        assert!(!src_a.exists());
        assert!(!src_b.exists());
        assert_eq!(
            fs::read(via_copy.join("f.txt")).unwrap(),
            fs::read(via_move.join("f.txt")).unwrap()
        );
    }

    #[test]
    fn test_rename_contract() {
        let dir = tempfile::tempdir().unwrap();
        let fm = manager();

        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"x").unwrap();

        assert!(fm
            .rename(&a.to_string_lossy(), &b.to_string_lossy())
            .unwrap());
        assert!(!a.exists());
        assert!(b.exists());

        // Source gone now, so a second rename fails
        assert!(!fm
            .rename(&a.to_string_lossy(), &b.to_string_lossy())
            .unwrap());
    }

    #[test]
    fn test_compress_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let fm = manager();

        let input = dir.path().join("a.txt");
        fs::write(&input, b"abc").unwrap();
        let archive = dir.path().join("out.zip");

        assert!(fm.compress(
            &[input.to_string_lossy().to_string()],
            &archive.to_string_lossy()
        ));
        // Second attempt refuses the existing archive
        assert!(!fm.compress(
            &[input.to_string_lossy().to_string()],
            &archive.to_string_lossy()
        ));
    }

    #[test]
    fn test_no_devices_is_empty() {
        let fm = manager();
        assert!(fm.list_devices().is_empty());
    }

    #[test]
    fn test_fingerprint_poll_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let fm = manager();
        let path = dir.path().to_string_lossy().to_string();

        let before = fm.fingerprint(&path);
        assert_eq!(before, fm.fingerprint(&path));

        fs::write(dir.path().join("new.txt"), b"x").unwrap();
        assert_ne!(before, fm.fingerprint(&path));
    }
}
