//! Artifact model: build outputs addressable both locally and remotely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Scheme prefix of the canonical local form of an artifact.
pub const LOCAL_FILE_SCHEME: &str = "file://";

/// A reference to a build output (a packaged distribution or a requirements
/// manifest), immutable once constructed.
///
/// The canonical form is a `file://` URI; the plain filesystem path is
/// derived by stripping the scheme. Transfer strategies receive the stripped
/// path and return a remote-reachable one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    uri: String,
}

impl Artifact {
    /// Wrap a local file as an artifact.
    pub fn from_local_path(path: impl AsRef<Path>) -> Self {
        Self {
            uri: format!("{}{}", LOCAL_FILE_SCHEME, path.as_ref().display()),
        }
    }

    /// The canonical `file://` form.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The local filesystem location (URI with the scheme prefix stripped).
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(self.uri.strip_prefix(LOCAL_FILE_SCHEME).unwrap_or(&self.uri))
    }
}

/// The immutable bundle of artifacts eligible for installation on a run.
///
/// Constructed once at controller initialization and never mutated.
///
/// Invariant: when `suppress_core_install` is true, the core install phase is
/// never attempted, even if `core` is present.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    suppress_core_install: bool,
    core: Option<Artifact>,
    extra: Option<Artifact>,
}

impl ArtifactSet {
    pub fn new(
        suppress_core_install: bool,
        core: Option<Artifact>,
        extra: Option<Artifact>,
    ) -> Self {
        Self {
            suppress_core_install,
            core,
            extra,
        }
    }

    /// Should the core install phase run at all?
    pub fn core_install_requested(&self) -> bool {
        !self.suppress_core_install
    }

    pub fn core(&self) -> Option<&Artifact> {
        self.core.as_ref()
    }

    pub fn extra(&self) -> Option<&Artifact> {
        self.extra.as_ref()
    }
}
