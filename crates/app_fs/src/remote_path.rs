//! Remote path scheme and backend routing
//!
//! A remote path addresses one file on one attached device:
//! `adb://<serial>/<device-relative-path>`. Everything else is a local
//! OS path used verbatim.

use crate::{FsError, Result};
use std::fmt;
use std::path::PathBuf;

/// Literal marker distinguishing a device path from a local path
pub const SCHEME: &str = "adb://";

/// Parsed remote path: opaque device serial + POSIX path on the device
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath {
    pub serial: String,
    pub device_path: String,
}

/// Which backend a path string belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Local(PathBuf),
    Remote(RemotePath),
}

impl Backend {
    /// Classify a path string.
    ///
    /// A path is remote iff it contains the scheme prefix anywhere in the
    /// string; malformed inputs may carry the prefix twice or not at the
    /// start. Local paths pass through untouched.
    pub fn classify(path: &str) -> Result<Self> {
        if path.contains(SCHEME) {
            Ok(Backend::Remote(RemotePath::parse(path)?))
        } else {
            Ok(Backend::Local(PathBuf::from(path)))
        }
    }
}

impl RemotePath {
    /// Parse a remote path string, collapsing a double prefix first.
    ///
    /// Fails with `MalformedPath` when the serial segment cannot be
    /// isolated. A missing device path defaults to the device root.
    pub fn parse(path: &str) -> Result<Self> {
        let canonical = canonicalize(path);

        let start = canonical
            .find(SCHEME)
            .ok_or_else(|| FsError::MalformedPath(path.to_string()))?;
        let rest = &canonical[start + SCHEME.len()..];

        let (serial, device_path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        if serial.is_empty() {
            return Err(FsError::MalformedPath(path.to_string()));
        }

        Ok(Self {
            serial: serial.to_string(),
            device_path: device_path.to_string(),
        })
    }

    /// Last segment of the device path (display name)
    pub fn name(&self) -> &str {
        self.device_path.rsplit('/').next().unwrap_or("")
    }

    /// Append one child segment to the device path
    pub fn join(&self, child: &str) -> Self {
        let device_path = if self.device_path.ends_with('/') {
            format!("{}{}", self.device_path, child)
        } else {
            format!("{}/{}", self.device_path, child)
        };

        Self {
            serial: self.serial.clone(),
            device_path,
        }
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", SCHEME, self.serial, self.device_path)
    }
}

/// Collapse an accidentally double-prefixed path to canonical form.
///
/// Strip the first prefix occurrence; if the remainder still contains the
/// prefix, the true payload is everything after the second occurrence,
/// re-wrapped with a single prefix. A single-prefix path is the documented
/// contract; the repair exists because path concatenation upstream has
/// produced doubled prefixes, so it is logged rather than silent.
fn canonicalize(path: &str) -> String {
    if !path.contains(SCHEME) {
        return path.to_string();
    }

    let stripped = path.replacen(SCHEME, "", 1);
    match stripped.find(SCHEME) {
        Some(idx) => {
            let payload = &stripped[idx + SCHEME.len()..];
            tracing::warn!("Collapsing double-prefixed remote path: {}", path);
            format!("{}{}", SCHEME, payload)
        }
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_local() {
        let backend = Backend::classify("/tmp/photos").unwrap();
        assert_eq!(backend, Backend::Local(PathBuf::from("/tmp/photos")));
    }

    #[test]
    fn test_classify_remote() {
        let backend = Backend::classify("adb://ABC123/sdcard/DCIM").unwrap();
        assert_eq!(
            backend,
            Backend::Remote(RemotePath {
                serial: "ABC123".to_string(),
                device_path: "/sdcard/DCIM".to_string(),
            })
        );
    }

    #[test]
    fn test_double_prefix_collapses() {
        let remote = RemotePath::parse("adb://ABC123/adb://ABC123/sdcard").unwrap();
        assert_eq!(remote.to_string(), "adb://ABC123/sdcard");
    }

    #[test]
    fn test_missing_device_path_defaults_to_root() {
        let remote = RemotePath::parse("adb://ABC123").unwrap();
        assert_eq!(remote.serial, "ABC123");
        assert_eq!(remote.device_path, "/");
    }

    #[test]
    fn test_empty_serial_is_malformed() {
        assert!(matches!(
            RemotePath::parse("adb:///sdcard"),
            Err(FsError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_name_and_join() {
        let remote = RemotePath::parse("adb://ABC123/sdcard/DCIM").unwrap();
        assert_eq!(remote.name(), "DCIM");

        let child = remote.join("Camera");
        assert_eq!(child.device_path, "/sdcard/DCIM/Camera");
        assert_eq!(child.serial, "ABC123");

        let root = RemotePath::parse("adb://ABC123").unwrap();
        assert_eq!(root.join("sdcard").device_path, "/sdcard");
    }
}
