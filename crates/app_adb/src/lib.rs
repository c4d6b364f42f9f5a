//! DroidFiler Device Bridge Module
//!
//! Wraps the `adb` executable as a request/response shell channel:
//! - Binary discovery over known SDK locations and PATH
//! - Device enumeration with human-readable model names
//! - File operations on attached devices (list, probe, pull, push, delete, rename)
//!
//! Every operation fails closed (false / empty) when the binary is missing
//! or the subprocess exits non-zero; stderr is kept for logging only.

mod client;
mod discovery;

pub use client::{AdbClient, AndroidDevice};
pub use discovery::discover_bridge;

use thiserror::Error;

/// Device bridge errors
#[derive(Error, Debug)]
pub enum AdbError {
    #[error("adb binary not found in known locations or PATH")]
    BridgeUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdbError>;
