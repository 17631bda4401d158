//! RunStore port - tracked-run bookkeeping and artifact storage.
//!
//! When store-based transfer is selected, the controller opens exactly one
//! tracked run at construction and closes it at the end of `run()`,
//! success and failure alike. A dangling open run is a resource leak.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{FerryError, RunId};

/// Handle to an open tracked run.
#[derive(Debug, Clone)]
pub struct TrackedRun {
    pub run_id: RunId,

    /// Root URI under which this run's artifacts are stored.
    pub artifact_root: String,

    pub started_at: DateTime<Utc>,
}

#[async_trait]
pub trait RunStore: Send + Sync {
    /// Open a new tracked run.
    async fn start_run(&self) -> Result<TrackedRun, FerryError>;

    /// Store a local file under the run's artifact root and return its
    /// remote-reachable path. Fails if the run is not open.
    async fn put_artifact(&self, run_id: &RunId, local: &Path) -> Result<String, FerryError>;

    /// Close a tracked run. Fails if the run is not open.
    async fn end_run(&self, run_id: &RunId) -> Result<(), FerryError>;
}
