//! ArtifactLocator: find the newest build output in the dist directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::info;

use crate::domain::Artifact;

/// File extension of packaged distributions.
pub const ARTIFACT_EXTENSION: &str = "whl";

/// Fixed subdirectory scanned for build outputs.
pub const DIST_DIR: &str = "dist";

/// Locates the most recently modified build artifact under `<root>/dist`
/// (or `./dist` when no root is configured).
///
/// Absence is a valid, recoverable state: the caller may still run without a
/// core package if it asked for that. A notice is logged either way.
#[derive(Debug, Clone, Default)]
pub struct ArtifactLocator {
    root: Option<PathBuf>,
}

impl ArtifactLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Scan for candidates and pick the newest build.
    ///
    /// With multiple candidates the one with the latest modification time
    /// wins; equal timestamps tie-break on the path name so the choice is
    /// deterministic within a process run.
    pub fn locate(&self) -> Option<Artifact> {
        info!("locating package file");
        let dist = match &self.root {
            Some(root) => root.join(DIST_DIR),
            None => PathBuf::from(DIST_DIR),
        };

        let mut candidates = self.scan(&dist);
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        match candidates.pop() {
            Some((_, path)) => {
                info!(path = %path.display(), "package file located");
                Some(Artifact::from_local_path(path))
            }
            None => {
                info!(
                    dist = %dist.display(),
                    "package file was not found; check the dist folder if you expect package-based imports"
                );
                None
            }
        }
    }

    fn scan(&self, dist: &Path) -> Vec<(SystemTime, PathBuf)> {
        let Ok(entries) = std::fs::read_dir(dist) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let is_artifact = path
                    .extension()
                    .is_some_and(|ext| ext == ARTIFACT_EXTENSION);
                if !is_artifact || !path.is_file() {
                    return None;
                }
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some((modified, path))
            })
            .collect()
    }
}
