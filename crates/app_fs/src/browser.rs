//! Local directory browsing

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One filesystem entry as shown to the caller.
///
/// Structural value equality (name + path + directory flag) so items can
/// key a multi-selection set. Items are rebuilt on every listing and
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileSystemItem {
    /// Display name (last path segment)
    pub name: String,

    /// Full addressable path, scheme-prefixed for remote entries
    pub path: String,

    pub is_dir: bool,
}

impl FileSystemItem {
    pub fn new(name: String, path: String, is_dir: bool) -> Self {
        Self { name, path, is_dir }
    }
}

/// List a local directory.
///
/// A missing or non-directory path yields an empty list, not an error.
pub fn list_local(path: &Path) -> Vec<FileSystemItem> {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    entries
        .flatten()
        .map(|entry| {
            let p = entry.path();
            FileSystemItem::new(
                entry.file_name().to_string_lossy().to_string(),
                p.to_string_lossy().to_string(),
                p.is_dir(),
            )
        })
        .collect()
}

/// List filesystem roots (drive letters on Windows, `/` elsewhere)
#[cfg(windows)]
pub fn list_roots() -> Vec<FileSystemItem> {
    let mut roots = Vec::new();

    for letter in b'A'..=b'Z' {
        let drive = format!("{}:\\", letter as char);
        if Path::new(&drive).exists() {
            roots.push(FileSystemItem::new(drive.clone(), drive, true));
        }
    }

    roots
}

#[cfg(not(windows))]
pub fn list_roots() -> Vec<FileSystemItem> {
    vec![FileSystemItem::new("/".to_string(), "/".to_string(), true)]
}

/// List externally mounted volumes (macOS `/Volumes` entries)
#[cfg(target_os = "macos")]
pub fn list_external_volumes() -> Vec<FileSystemItem> {
    list_local(Path::new("/Volumes"))
        .into_iter()
        .filter(|item| item.is_dir)
        .collect()
}

#[cfg(not(target_os = "macos"))]
pub fn list_external_volumes() -> Vec<FileSystemItem> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    #[test]
    fn test_list_local() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut items = list_local(dir.path());
        items.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "a.txt");
        assert!(!items[0].is_dir);
        assert_eq!(items[1].name, "sub");
        assert!(items[1].is_dir);
    }

    #[test]
    fn test_list_missing_is_empty() {
        assert!(list_local(Path::new("/definitely/not/real")).is_empty());
    }

    #[test]
    fn test_items_key_a_selection_set() {
        let a = FileSystemItem::new("a".into(), "/x/a".into(), false);
        let b = FileSystemItem::new("a".into(), "/x/a".into(), false);

        let mut selection = HashSet::new();
        selection.insert(a);
        assert!(selection.contains(&b));
    }

    #[test]
    fn test_roots_not_empty() {
        assert!(!list_roots().is_empty());
    }
}
