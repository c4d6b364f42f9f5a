//! Synchronous adb client
//!
//! Each call spawns one subprocess and blocks the calling thread until it
//! exits. Success is the subprocess exit status; stdout is parsed as UTF-8
//! text lines; stderr is captured for diagnostics only.

use crate::discovery::discover_bridge;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// State token adb reports for a device that is attached and ready
const READY_STATE: &str = "device";

/// An attached Android device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidDevice {
    /// Opaque stable identifier
    pub serial: String,

    /// Human-readable model name (falls back to serial)
    pub name: String,
}

/// Client for the adb device bridge.
///
/// Construct once with the resolved binary path (from configuration or
/// [`discover_bridge`]) and share it; the client holds no other state.
pub struct AdbClient {
    bridge: Option<PathBuf>,
}

struct BridgeOutput {
    success: bool,
    lines: Vec<String>,
}

impl BridgeOutput {
    fn failure() -> Self {
        Self {
            success: false,
            lines: Vec::new(),
        }
    }
}

impl AdbClient {
    /// Create a client, using `bridge` if given, discovery otherwise
    pub fn new(bridge: Option<PathBuf>) -> Self {
        let bridge = bridge.or_else(discover_bridge);
        Self { bridge }
    }

    /// Is the bridge binary available?
    pub fn is_available(&self) -> bool {
        self.bridge.is_some()
    }

    /// The resolved bridge binary path, for diagnostics
    pub fn bridge_path(&self) -> crate::Result<&Path> {
        self.bridge
            .as_deref()
            .ok_or(crate::AdbError::BridgeUnavailable)
    }

    /// Run the bridge binary and capture its output
    fn exec(&self, args: &[&str]) -> BridgeOutput {
        let Some(bridge) = &self.bridge else {
            tracing::warn!("Bridge unavailable, skipping: adb {}", args.join(" "));
            return BridgeOutput::failure();
        };

        match Command::new(bridge).args(args).output() {
            Ok(output) => {
                let lines = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .map(|l| l.trim_end_matches('\r').to_string())
                    .collect();

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    tracing::debug!(
                        "adb {} exited with {:?}: {}",
                        args.join(" "),
                        output.status.code(),
                        stderr.trim()
                    );
                }

                BridgeOutput {
                    success: output.status.success(),
                    lines,
                }
            }
            Err(e) => {
                tracing::debug!("Failed to spawn adb {}: {}", args.join(" "), e);
                BridgeOutput::failure()
            }
        }
    }

    /// Check whether a device path is a directory.
    ///
    /// The shell conditional exits 0 either way, so the answer is carried
    /// in the echoed token, not the exit status.
    pub fn is_directory(&self, serial: &str, path: &str) -> bool {
        let cond = format!("[ -d \"{}\" ] && echo dir || echo not", path);
        let out = self.exec(&["-s", serial, "shell", &cond]);
        out.lines.first().map(String::as_str) == Some("dir")
    }

    /// List entry names in a device directory.
    ///
    /// Filters out the `.` / `..` pseudo-entries and blank lines. A failed
    /// listing is an empty result.
    pub fn list_names(&self, serial: &str, path: &str) -> Vec<String> {
        let out = self.exec(&["-s", serial, "shell", "ls", "-1a", path]);
        if !out.success {
            return Vec::new();
        }

        out.lines
            .into_iter()
            .filter(|name| name != "." && name != ".." && !name.trim().is_empty())
            .collect()
    }

    /// Pull a file from the device to a local path
    pub fn pull(&self, serial: &str, remote: &str, local: &Path) -> bool {
        let local = local.to_string_lossy();
        self.exec(&["-s", serial, "pull", remote, &local]).success
    }

    /// Push a local file to a device path
    pub fn push(&self, local: &Path, serial: &str, remote: &str) -> bool {
        let local = local.to_string_lossy();
        self.exec(&["-s", serial, "push", &local, remote]).success
    }

    /// Recursively delete a device path
    pub fn delete(&self, serial: &str, path: &str) -> bool {
        self.exec(&["-s", serial, "shell", "rm", "-rf", path]).success
    }

    /// Create a directory (and parents) on the device
    pub fn mkdir(&self, serial: &str, path: &str) -> bool {
        self.exec(&["-s", serial, "shell", "mkdir", "-p", path]).success
    }

    /// Move/rename a device path on the same device
    pub fn rename(&self, serial: &str, old_path: &str, new_path: &str) -> bool {
        self.exec(&["-s", serial, "shell", "mv", old_path, new_path])
            .success
    }

    /// Copy a device file to another (or the same) device via a local
    /// temp file. Pull-then-push works uniformly for same-serial and
    /// cross-serial copies.
    pub fn copy_between_devices(
        &self,
        src_serial: &str,
        src_path: &str,
        dst_serial: &str,
        dst_path: &str,
    ) -> bool {
        let tmp = match temp_pull_path() {
            Ok(tmp) => tmp,
            Err(_) => return false,
        };

        if !self.pull(src_serial, src_path, &tmp) {
            return false;
        }

        let pushed = self.push(&tmp, dst_serial, dst_path);
        remove_temp(&tmp);
        pushed
    }

    /// List attached, ready devices with resolved model names
    pub fn list_devices(&self) -> Vec<AndroidDevice> {
        let out = self.exec(&["devices"]);

        parse_device_serials(&out.lines)
            .into_iter()
            .map(|serial| {
                let name = self.device_name(&serial).unwrap_or_else(|| serial.clone());
                AndroidDevice { serial, name }
            })
            .collect()
    }

    /// Query the device model name (best-effort)
    pub fn device_name(&self, serial: &str) -> Option<String> {
        let out = self.exec(&["-s", serial, "shell", "getprop", "ro.product.model"]);
        if !out.success {
            return None;
        }

        out.lines
            .first()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
    }
}

/// Staging path for one pull-then-push copy. The sequence counter keeps
/// concurrent copies from colliding on the millisecond stamp.
fn temp_pull_path() -> std::io::Result<PathBuf> {
    static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

    let dir = std::env::temp_dir().join("adbtmp");
    std::fs::create_dir_all(&dir)?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);

    Ok(dir.join(format!("{}-{}-{}", std::process::id(), stamp, seq)))
}

/// Remove a pull staging path; pulls of device directories land as
/// directories, so a plain file unlink is not enough.
fn remove_temp(path: &Path) {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    if let Err(e) = result {
        tracing::debug!("Failed to remove pull staging path {}: {}", path.display(), e);
    }
}

/// Extract serials from `adb devices` output: one `<serial>\t<state>` line
/// per device, plus a header. Only lines ending in the ready state count.
fn parse_device_serials(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.ends_with(READY_STATE) && !line.starts_with("List"))
        .filter_map(|line| line.split('\t').next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable_client() -> AdbClient {
        AdbClient { bridge: None }
    }

    #[test]
    fn test_parse_device_serials() {
        let lines = vec![
            "List of devices attached".to_string(),
            "ABC123\tdevice".to_string(),
            "XYZ789\tunauthorized".to_string(),
            "DEF456\tdevice".to_string(),
            String::new(),
        ];

        let serials = parse_device_serials(&lines);
        assert_eq!(serials, vec!["ABC123", "DEF456"]);
    }

    #[test]
    fn test_parse_no_devices() {
        let lines = vec!["List of devices attached".to_string(), String::new()];
        assert!(parse_device_serials(&lines).is_empty());
    }

    #[test]
    fn test_unavailable_bridge_fails_closed() {
        let client = unavailable_client();

        assert!(!client.is_available());
        assert!(client.list_devices().is_empty());
        assert!(client.list_names("ABC123", "/sdcard").is_empty());
        assert!(!client.is_directory("ABC123", "/sdcard"));
        assert!(!client.delete("ABC123", "/sdcard/x"));
        assert!(!client.rename("ABC123", "/sdcard/a", "/sdcard/b"));
        assert!(!client.push(Path::new("/tmp/x"), "ABC123", "/sdcard/x"));
        assert!(!client.pull("ABC123", "/sdcard/x", Path::new("/tmp/x")));
    }

    #[test]
    fn test_temp_pull_paths_are_unique() {
        let a = temp_pull_path().unwrap();
        let b = temp_pull_path().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_temp_handles_directories() {
        let dir = tempfile::tempdir().unwrap();

        let staged_dir = dir.path().join("pulled");
        std::fs::create_dir_all(staged_dir.join("sub")).unwrap();
        std::fs::write(staged_dir.join("sub/a.jpg"), b"x").unwrap();
        remove_temp(&staged_dir);
        assert!(!staged_dir.exists());

        let staged_file = dir.path().join("pulled.jpg");
        std::fs::write(&staged_file, b"x").unwrap();
        remove_temp(&staged_file);
        assert!(!staged_file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_fake_bridge_lists_devices() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("adb");
        {
            let mut f = std::fs::File::create(&bin).unwrap();
            writeln!(f, "#!/bin/sh").unwrap();
            writeln!(f, "if [ \"$1\" = devices ]; then").unwrap();
            writeln!(f, "  echo 'List of devices attached'").unwrap();
            writeln!(f, "  printf 'FAKE01\\tdevice\\n'").unwrap();
            writeln!(f, "else").unwrap();
            writeln!(f, "  echo 'Pixel 7'").unwrap();
            writeln!(f, "fi").unwrap();
        }
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let client = AdbClient::new(Some(bin));
        let devices = client.list_devices();

        assert_eq!(
            devices,
            vec![AndroidDevice {
                serial: "FAKE01".to_string(),
                name: "Pixel 7".to_string(),
            }]
        );
    }
}
