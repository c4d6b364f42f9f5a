//! DroidFiler File System Abstraction Layer
//!
//! Provides a unified interface over local disk and Android device paths:
//! - RemotePath/Backend: scheme-prefixed path routing
//! - VfsNode: uniform list/rename/copy/move/delete over both backends
//! - Archive writer for zip compression
//! - Directory change fingerprinting
//! - Directory browsing (FileSystemItem listings)

mod remote_path;
mod node;
mod archive;
mod fingerprint;
mod browser;
mod ops;

pub use remote_path::{Backend, RemotePath, SCHEME};
pub use node::{LocalNode, RemoteNode, VfsNode};
pub use archive::compress;
pub use fingerprint::{fingerprint, REMOTE_FINGERPRINT};
pub use browser::{list_external_volumes, list_local, list_roots, FileSystemItem};
pub use ops::FileManager;

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed remote path: {0}")]
    MalformedPath(String),

    #[error("Archive error: {0}")]
    Archive(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
