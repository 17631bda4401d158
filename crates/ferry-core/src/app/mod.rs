//! App - アプリケーション層
//!
//! Combines the ports into the run orchestration:
//! - **ControllerBuilder / ExecutionController**: the five-phase run
//! - **ArtifactLocator**: find the newest build output to ship
//! - **RuntimeProbe / refresh_if_necessary**: the interpreter-refresh decision

pub mod controller;
pub mod locator;
pub mod probe;

pub use self::controller::{ControllerBuilder, ExecutionController};
pub use self::locator::{ARTIFACT_EXTENSION, ArtifactLocator, DIST_DIR};
pub use self::probe::{RUNTIME_VERSION_VARIABLE, RuntimeProbe, refresh_if_necessary};
