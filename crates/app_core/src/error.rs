//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Malformed remote path: {0}")]
    MalformedPath(String),

    #[error("Device bridge error: {0}")]
    Bridge(String),

    #[error("Archive error: {0}")]
    Archive(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::FileNotFound(_)
                | AppError::MalformedPath(_)
                | AppError::Bridge(_)
                | AppError::Archive(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::FileNotFound(path) => format!("File not found: {}", path),
            AppError::MalformedPath(path) => format!("Invalid device path: {}", path),
            AppError::Bridge(_) => {
                "Android bridge unavailable. Check that adb is installed.".to_string()
            }
            AppError::Archive(msg) => format!("Archive error: {}", msg),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::MalformedPath(p) => AppError::MalformedPath(p),
            app_fs::FsError::Archive(msg) => AppError::Archive(msg),
            app_fs::FsError::Io(e) => AppError::Io(e),
        }
    }
}

impl From<app_adb::AdbError> for AppError {
    fn from(e: app_adb::AdbError) -> Self {
        match e {
            app_adb::AdbError::BridgeUnavailable => AppError::Bridge(e.to_string()),
            app_adb::AdbError::Io(e) => AppError::Io(e),
        }
    }
}
