//! RemoteExecutionClient port - the remote interpreter session.
//!
//! The session actually executing commands and code on the remote machine
//! lives outside this crate. The controller only ever talks to this trait,
//! treats every call as blocking until the remote side reports completion,
//! and never parses command output except for the version probe.
//!
//! Design intent:
//! - The session is exclusively owned by the active controller for the
//!   duration of `run()`; no concurrent controllers share one session.
//! - Timeouts and retries belong to the implementation, not to callers.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{FerryError, TaskParameters};

#[async_trait]
pub trait RemoteExecutionClient: Send + Sync {
    /// Execute a raw command in the remote interpreter and return its
    /// captured output.
    async fn execute_command(&self, command: &str, verbose: bool) -> Result<String, FerryError>;

    /// Execute the given file as a standalone script.
    async fn execute_file(&self, file: &Path) -> Result<(), FerryError>;

    /// Execute a named entry point registered by an installed package.
    async fn execute_entry_point(
        &self,
        package_name: &str,
        entry_point: &str,
    ) -> Result<(), FerryError>;

    /// Install a package from a remote-reachable path, optionally with
    /// package-manager extras (e.g. `[aws,azure]`).
    async fn install_package(
        &self,
        remote_path: &str,
        extras: Option<&str>,
    ) -> Result<(), FerryError>;

    /// Push resolved task parameters into the session's argument context so
    /// a subsequent dispatch can read them.
    async fn setup_arguments(&self, parameters: &TaskParameters) -> Result<(), FerryError>;

    /// Restart the remote interpreter in place so freshly installed
    /// libraries become importable without a full session restart.
    async fn restart_interpreter(&self) -> Result<(), FerryError>;
}
