//! DroidFiler Core Domain Logic
//!
//! This crate contains:
//! - Application configuration
//! - Error types
//! - The blocking-operation offload worker

pub mod config;
pub mod error;
pub mod task;

pub use config::{AppConfig, DeviceConfig, FilerConfig, GeneralConfig};
pub use error::AppError;
pub use task::{OpHandle, OpRunner};
