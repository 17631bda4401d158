//! TransferStrategy port - how a local artifact becomes remotely reachable.
//!
//! Two interchangeable implementations exist (session-context-attached and
//! tracked-run-store-attached, see `impls`); the controller selects one at
//! construction and never inspects which one it holds.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::FerryError;

#[async_trait]
pub trait TransferStrategy: Send + Sync {
    /// Upload a local file and return a path reachable from the remote side.
    async fn upload_and_provide_path(&self, local: &Path) -> Result<String, FerryError>;
}
