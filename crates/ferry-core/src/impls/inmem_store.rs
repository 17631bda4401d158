//! InMemoryRunStore - 開発用の RunStore 実装
//!
//! Stages run artifacts under a local directory and tracks which runs are
//! open in memory. Good enough for the demo wiring and for tests; a real
//! deployment points the controller at an artifact-store-backed
//! implementation instead.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{FerryError, RunId};
use crate::ports::{IdGenerator, RunStore, SystemClock, TrackedRun, UlidGenerator};

pub struct InMemoryRunStore {
    root: PathBuf,
    ids: UlidGenerator<SystemClock>,
    open_runs: Mutex<HashSet<RunId>>,
}

impl InMemoryRunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ids: UlidGenerator::new(SystemClock),
            open_runs: Mutex::new(HashSet::new()),
        }
    }

    /// A store rooted in the system temp directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("ferry-runs"))
    }

    fn artifact_dir(&self, run_id: &RunId) -> PathBuf {
        self.root.join(run_id.to_string()).join("artifacts")
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn start_run(&self) -> Result<TrackedRun, FerryError> {
        let run_id = self.ids.generate_run_id();
        let artifact_dir = self.artifact_dir(&run_id);
        tokio::fs::create_dir_all(&artifact_dir).await?;

        self.open_runs.lock().await.insert(run_id);

        Ok(TrackedRun {
            run_id,
            artifact_root: artifact_dir.display().to_string(),
            started_at: Utc::now(),
        })
    }

    async fn put_artifact(&self, run_id: &RunId, local: &Path) -> Result<String, FerryError> {
        if !self.open_runs.lock().await.contains(run_id) {
            return Err(FerryError::run_store(format!("run {run_id} is not open")));
        }

        let file_name = local
            .file_name()
            .ok_or_else(|| {
                FerryError::run_store(format!("not a storable file path: {}", local.display()))
            })?;
        let dest = self.artifact_dir(run_id).join(file_name);
        tokio::fs::copy(local, &dest).await?;

        Ok(dest.display().to_string())
    }

    async fn end_run(&self, run_id: &RunId) -> Result<(), FerryError> {
        // 終了した run のファイルは残す（結果の確認用）
        if !self.open_runs.lock().await.remove(run_id) {
            return Err(FerryError::run_store(format!("run {run_id} is not open")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    fn temp_store() -> InMemoryRunStore {
        InMemoryRunStore::new(std::env::temp_dir().join(format!("ferry-store-{}", Ulid::new())))
    }

    fn temp_file(content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ferry-artifact-{}.whl", Ulid::new()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn run_lifecycle_roundtrip() {
        let store = temp_store();

        let run = store.start_run().await.unwrap();
        let local = temp_file(b"wheel");

        let stored = store.put_artifact(&run.run_id, &local).await.unwrap();
        assert_eq!(std::fs::read(&stored).unwrap(), b"wheel");
        assert!(stored.contains(&run.run_id.to_string()));

        store.end_run(&run.run_id).await.unwrap();

        let _ = std::fs::remove_file(&local);
        let _ = std::fs::remove_dir_all(&store.root);
    }

    #[tokio::test]
    async fn put_after_end_is_rejected() {
        let store = temp_store();
        let run = store.start_run().await.unwrap();
        store.end_run(&run.run_id).await.unwrap();

        let local = temp_file(b"wheel");
        let result = store.put_artifact(&run.run_id, &local).await;
        assert!(matches!(result, Err(FerryError::RunStore(_))));

        let _ = std::fs::remove_file(&local);
        let _ = std::fs::remove_dir_all(&store.root);
    }

    #[tokio::test]
    async fn unknown_run_is_rejected() {
        let store = temp_store();
        let bogus = RunId::from_ulid(Ulid::new());

        let local = temp_file(b"wheel");
        assert!(store.put_artifact(&bogus, &local).await.is_err());
        assert!(store.end_run(&bogus).await.is_err());

        let _ = std::fs::remove_file(&local);
        let _ = std::fs::remove_dir_all(&store.root);
    }
}
