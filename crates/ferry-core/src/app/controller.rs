//! ExecutionController: prepare a remote session and run one task on it.
//!
//! The controller owns one [`ArtifactSet`], one [`TransferStrategy`] and one
//! session handle, and sequences five phases:
//!
//! 1. requirements install (when a manifest path was supplied)
//! 2. core package install (unless suppressed)
//! 3. extra package install (when an extra artifact is present)
//! 4. parameter resolution (when the task carries parameters)
//! 5. task dispatch (always, exactly one branch)
//!
//! Phases run strictly in order, each remote call blocking until the session
//! reports completion; a later install may assume an earlier one's libraries
//! are importable. No phase re-executes and there are no internal retries: a
//! remote-call failure is a hard stop of the run. A tracked run opened at
//! construction is closed at the end of `run()`, success and failure alike.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Artifact, ArtifactSet, FerryError, TaskDescriptor};
use crate::impls::{ContextTransfer, FileReferenceResolver, StoreTransfer};
use crate::ports::{
    ParameterResolver, RemoteExecutionClient, RunStore, TrackedRun, TransferStrategy,
};

use super::probe::refresh_if_necessary;

enum TransferMode {
    /// Upload through the session's own command channel.
    Context,
    /// Upload into a tracked run on this store.
    RunStore(Arc<dyn RunStore>),
}

/// Wires up an [`ExecutionController`].
///
/// The transfer strategy and (when store-based) the tracked run are selected
/// exactly once, in `build()`, and held for the controller's lifetime.
pub struct ControllerBuilder {
    client: Arc<dyn RemoteExecutionClient>,
    task: TaskDescriptor,
    suppress_core_install: bool,
    core_artifact: Option<Artifact>,
    extra_artifact: Option<Artifact>,
    requirements_file: Option<PathBuf>,
    install_extras: Option<String>,
    resolver: Option<Arc<dyn ParameterResolver>>,
    mode: TransferMode,
}

impl ControllerBuilder {
    pub fn new(client: Arc<dyn RemoteExecutionClient>, task: TaskDescriptor) -> Self {
        Self {
            client,
            task,
            suppress_core_install: false,
            core_artifact: None,
            extra_artifact: None,
            requirements_file: None,
            install_extras: None,
            resolver: None,
            mode: TransferMode::Context,
        }
    }

    /// Never install the core package, even when one is present.
    pub fn suppress_core_install(mut self, suppress: bool) -> Self {
        self.suppress_core_install = suppress;
        self
    }

    pub fn core_artifact(mut self, artifact: Artifact) -> Self {
        self.core_artifact = Some(artifact);
        self
    }

    pub fn extra_artifact(mut self, artifact: Artifact) -> Self {
        self.extra_artifact = Some(artifact);
        self
    }

    /// Install this requirements manifest before anything else.
    pub fn requirements_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.requirements_file = Some(path.into());
        self
    }

    /// Package-manager extras for the core install (e.g. `aws,azure`).
    pub fn install_extras(mut self, extras: impl Into<String>) -> Self {
        self.install_extras = Some(extras.into());
        self
    }

    /// Replace the built-in [`FileReferenceResolver`].
    pub fn parameter_resolver(mut self, resolver: Arc<dyn ParameterResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Upload through the session context (the default). No tracked run is
    /// opened.
    pub fn upload_via_context(mut self) -> Self {
        self.mode = TransferMode::Context;
        self
    }

    /// Upload into a tracked run on this store; the run is opened in
    /// `build()` and closed when `run()` finishes.
    pub fn upload_via_run_store(mut self, store: Arc<dyn RunStore>) -> Self {
        self.mode = TransferMode::RunStore(store);
        self
    }

    pub async fn build(self) -> Result<ExecutionController, FerryError> {
        let (transfer, tracked_run): (
            Arc<dyn TransferStrategy>,
            Option<(Arc<dyn RunStore>, TrackedRun)>,
        ) = match self.mode {
            TransferMode::Context => {
                info!("context-based file transfer will be used");
                (Arc::new(ContextTransfer::new(self.client.clone())), None)
            }
            TransferMode::RunStore(store) => {
                info!("run-store-based file transfer will be used");
                let run = store.start_run().await?;
                info!(run_id = %run.run_id, "tracked run opened");
                (
                    Arc::new(StoreTransfer::new(store.clone(), run.run_id)),
                    Some((store, run)),
                )
            }
        };

        Ok(ExecutionController {
            client: self.client,
            artifacts: ArtifactSet::new(
                self.suppress_core_install,
                self.core_artifact,
                self.extra_artifact,
            ),
            transfer,
            resolver: self
                .resolver
                .unwrap_or_else(|| Arc::new(FileReferenceResolver::new())),
            requirements_file: self.requirements_file,
            install_extras: self.install_extras,
            task: self.task,
            tracked_run,
        })
    }
}

/// Runs one task on an exclusively-owned remote session.
pub struct ExecutionController {
    client: Arc<dyn RemoteExecutionClient>,
    artifacts: ArtifactSet,
    transfer: Arc<dyn TransferStrategy>,
    resolver: Arc<dyn ParameterResolver>,
    requirements_file: Option<PathBuf>,
    install_extras: Option<String>,
    task: TaskDescriptor,
    tracked_run: Option<(Arc<dyn RunStore>, TrackedRun)>,
}

impl ExecutionController {
    pub fn builder(
        client: Arc<dyn RemoteExecutionClient>,
        task: TaskDescriptor,
    ) -> ControllerBuilder {
        ControllerBuilder::new(client, task)
    }

    /// Execute the full phase sequence, then finalize.
    ///
    /// Consumes the controller: a run happens at most once, and the session
    /// is released afterwards.
    pub async fn run(mut self) -> Result<(), FerryError> {
        let outcome = self.run_phases().await;
        // 成功・失敗に関わらず tracked run は必ず閉じる
        self.finish().await;
        outcome
    }

    async fn run_phases(&mut self) -> Result<(), FerryError> {
        let nothing_to_install = self.requirements_file.is_none()
            && !self.artifacts.core_install_requested()
            && self.artifacts.extra().is_none();
        if nothing_to_install {
            warn!("no requirements file or packages to install; dispatching into the session as-is");
        }

        if let Some(requirements) = self.requirements_file.clone() {
            self.install_requirements(&requirements).await?;
        }

        if self.artifacts.core_install_requested() {
            self.install_core_package().await?;
        }

        if self.artifacts.extra().is_some() {
            info!("installing extra package");
            self.install_extra_package().await?;
        }

        self.dispatch().await
    }

    /// Phase 1: requirements manifest.
    async fn install_requirements(&self, manifest: &Path) -> Result<(), FerryError> {
        if !manifest.exists() {
            return Err(FerryError::RequirementsFileMissing(manifest.to_owned()));
        }

        info!("installing provided requirements");
        let remote_path = self.transfer.upload_and_provide_path(manifest).await?;
        let command = format!("%pip install -U -r {remote_path}");
        self.client.execute_command(&command, false).await?;
        refresh_if_necessary(self.client.as_ref()).await?;
        info!("provided requirements installed");
        Ok(())
    }

    /// Phase 2: core package.
    async fn install_core_package(&self) -> Result<(), FerryError> {
        let artifact = self.artifacts.core().ok_or(FerryError::CorePackageMissing)?;

        info!("uploading package");
        let remote_path = self
            .transfer
            .upload_and_provide_path(&artifact.local_path())
            .await?;
        info!("uploading package - done");

        self.client
            .install_package(&remote_path, self.install_extras.as_deref())
            .await?;
        refresh_if_necessary(self.client.as_ref()).await?;
        info!("installing package - done");
        Ok(())
    }

    /// Phase 3: extra package. Same shape as the core install, without
    /// extras parameterization.
    async fn install_extra_package(&self) -> Result<(), FerryError> {
        let artifact = self
            .artifacts
            .extra()
            .ok_or(FerryError::ExtraPackageMissing)?;

        info!("uploading extra package");
        let remote_path = self
            .transfer
            .upload_and_provide_path(&artifact.local_path())
            .await?;
        info!("uploading extra package - done");

        self.client.install_package(&remote_path, None).await?;
        refresh_if_necessary(self.client.as_ref()).await?;
        info!("installing extra package - done");
        Ok(())
    }

    /// Phases 4 and 5: resolve parameters if present, then dispatch exactly
    /// one branch of the task descriptor.
    async fn dispatch(&mut self) -> Result<(), FerryError> {
        if !self.task.parameters().is_empty() {
            self.resolve_parameters().await?;
        }

        match &self.task {
            TaskDescriptor::Script { file, .. } => {
                info!(file = %file.display(), "starting script execution");
                self.client.execute_file(file).await?;
                info!("script execution finished");
            }
            TaskDescriptor::EntryPoint {
                package_name,
                entry_point,
                ..
            } => {
                info!(package = %package_name, entry_point = %entry_point, "starting entry point execution");
                self.client
                    .execute_entry_point(package_name, entry_point)
                    .await?;
                info!("entry point execution finished");
            }
        }
        Ok(())
    }

    async fn resolve_parameters(&mut self) -> Result<(), FerryError> {
        info!("processing task parameters");
        let mut parameters = self.task.parameters().clone();
        self.resolver
            .resolve(&self.artifacts, self.transfer.as_ref(), &mut parameters)
            .await?;
        self.client.setup_arguments(&parameters).await?;
        *self.task.parameters_mut() = parameters;
        info!("processing task parameters - done");
        Ok(())
    }

    /// Finalization: close the tracked run if one was opened. Best-effort on
    /// the failure path; a close failure is logged, not raised, so it cannot
    /// mask the phase error.
    async fn finish(&mut self) {
        if let Some((store, run)) = self.tracked_run.take() {
            match store.end_run(&run.run_id).await {
                Ok(()) => info!(run_id = %run.run_id, "tracked run closed"),
                Err(error) => warn!(%error, run_id = %run.run_id, "failed to close tracked run"),
            }
        }
    }
}
