//! Domain model (artifacts, task shapes, ids, versions, errors).

pub mod artifact;
pub mod errors;
pub mod ids;
pub mod runtime_version;
pub mod task;

pub use artifact::{Artifact, ArtifactSet, LOCAL_FILE_SCHEME};
pub use errors::FerryError;
pub use ids::{Id, IdMarker, RunId, UploadId};
pub use runtime_version::{REFRESH_MIN_MAJOR, RuntimeVersion};
pub use task::{TaskDescriptor, TaskParameters};
