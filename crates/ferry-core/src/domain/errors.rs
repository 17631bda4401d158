//! Error model for a controller run.
//!
//! Design intent:
//! - Configuration and missing-artifact errors abort a run before the phase
//!   issues any remote call.
//! - Remote-call failures propagate out of `run()` unmodified; the controller
//!   never retries.
//! - Version-probe failures are absorbed inside the probe and never appear
//!   here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FerryError {
    /// A requirements install was requested but the manifest is not on disk.
    #[error("requirements file provided, but doesn't exist at path {}", .0.display())]
    RequirementsFileMissing(PathBuf),

    /// A core package install was requested but no build output exists.
    #[error("core package was not found; check that the dist directory contains a build")]
    CorePackageMissing,

    /// An extra package was present at construction but is gone now.
    #[error("extra package was not found; check that the dist directory contains a build")]
    ExtraPackageMissing,

    /// Any failure reported by the remote session during upload, install,
    /// or dispatch.
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// Failure while moving an artifact to the remote side.
    #[error("artifact transfer failed: {0}")]
    Transfer(String),

    /// Failure in the tracked-run store (open, upload, close).
    #[error("tracked run error: {0}")]
    RunStore(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FerryError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteCall(message.into())
    }

    pub fn transfer(message: impl Into<String>) -> Self {
        Self::Transfer(message.into())
    }

    pub fn run_store(message: impl Into<String>) -> Self {
        Self::RunStore(message.into())
    }
}
