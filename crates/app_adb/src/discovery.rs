//! adb binary discovery
//!
//! The bridge binary is resolved once at startup and injected into
//! [`AdbClient::new`](crate::AdbClient::new); there is no process-wide
//! mutable cache, so tests can point the client at a fake binary.

use std::path::PathBuf;

#[cfg(windows)]
const BRIDGE_BINARY: &str = "adb.exe";

#[cfg(not(windows))]
const BRIDGE_BINARY: &str = "adb";

/// Search known installation locations and PATH for the adb binary.
///
/// Search order: `$ANDROID_HOME/platform-tools`, the default SDK locations
/// for macOS and Linux, Homebrew prefixes, then every PATH entry.
pub fn discover_bridge() -> Option<PathBuf> {
    for dir in candidate_dirs() {
        let candidate = dir.join(BRIDGE_BINARY);
        if candidate.is_file() {
            tracing::info!("Found device bridge: {}", candidate.display());
            return Some(candidate);
        }
    }

    tracing::warn!("Device bridge binary not found; remote operations disabled");
    None
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(sdk) = std::env::var_os("ANDROID_HOME") {
        dirs.push(PathBuf::from(sdk).join("platform-tools"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join("Library/Android/sdk/platform-tools"));
        dirs.push(home.join("Android/Sdk/platform-tools"));
    }

    dirs.push(PathBuf::from("/opt/homebrew/bin"));
    dirs.push(PathBuf::from("/usr/local/bin"));

    if let Some(path) = std::env::var_os("PATH") {
        dirs.extend(std::env::split_paths(&path));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_dirs_include_path_entries() {
        // PATH is always set in any sane environment
        let dirs = candidate_dirs();
        assert!(!dirs.is_empty());
    }
}
