//! ParameterResolver port - rewriting artifact references in parameters.
//!
//! Task parameters may embed references to local artifacts. Before dispatch,
//! a resolver rewrites those references into their uploaded remote form.
//! Invoked at most once per run, and only when parameters are present.

use async_trait::async_trait;

use crate::domain::{ArtifactSet, FerryError, TaskParameters};
use crate::ports::TransferStrategy;

#[async_trait]
pub trait ParameterResolver: Send + Sync {
    /// Walk `parameters` and replace embedded artifact references in place,
    /// uploading through `transfer` where needed.
    async fn resolve(
        &self,
        artifacts: &ArtifactSet,
        transfer: &dyn TransferStrategy,
        parameters: &mut TaskParameters,
    ) -> Result<(), FerryError>;
}
