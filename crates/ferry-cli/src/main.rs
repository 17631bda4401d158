use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use ferry_core::app::{ArtifactLocator, ExecutionController, RUNTIME_VERSION_VARIABLE};
use ferry_core::domain::{FerryError, TaskDescriptor, TaskParameters};
use ferry_core::impls::InMemoryRunStore;
use ferry_core::ports::RemoteExecutionClient;

/// What the demo runs, in the same JSON shape a deployment config would use.
#[derive(Debug, Deserialize)]
struct DemoPlan {
    task: TaskDescriptor,
}

/// Demo session: prints every call instead of talking to a real remote
/// interpreter, and reports a runtime version new enough for the refresh
/// path to trigger.
struct EchoSession;

fn preview(command: &str) -> String {
    let flat = command.replace('\n', "; ");
    if flat.len() > 96 {
        format!("{}…", &flat[..96])
    } else {
        flat
    }
}

#[async_trait]
impl RemoteExecutionClient for EchoSession {
    async fn execute_command(&self, command: &str, _verbose: bool) -> Result<String, FerryError> {
        println!("[session] execute_command: {}", preview(command));
        if command.contains(RUNTIME_VERSION_VARIABLE) {
            return Ok("14.3.1".to_string());
        }
        Ok(String::new())
    }

    async fn execute_file(&self, file: &Path) -> Result<(), FerryError> {
        println!("[session] execute_file: {}", file.display());
        Ok(())
    }

    async fn execute_entry_point(
        &self,
        package_name: &str,
        entry_point: &str,
    ) -> Result<(), FerryError> {
        println!("[session] execute_entry_point: {package_name}::{entry_point}");
        Ok(())
    }

    async fn install_package(
        &self,
        remote_path: &str,
        extras: Option<&str>,
    ) -> Result<(), FerryError> {
        println!("[session] install_package: {remote_path} (extras: {extras:?})");
        Ok(())
    }

    async fn setup_arguments(&self, parameters: &TaskParameters) -> Result<(), FerryError> {
        println!("[session] setup_arguments: {parameters:?}");
        Ok(())
    }

    async fn restart_interpreter(&self) -> Result<(), FerryError> {
        println!("[session] restart_interpreter");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), FerryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // (A) Look for a locally built package. Absence is fine for the demo;
    // we suppress the core install when nothing was built.
    let core_artifact = ArtifactLocator::new().locate();

    // (B) A requirements manifest and a data file referenced by the task
    // parameters, staged in the temp directory.
    let staging = std::env::temp_dir().join("ferry-demo");
    std::fs::create_dir_all(&staging)?;
    let requirements = staging.join("requirements.txt");
    std::fs::write(&requirements, b"requests==2.31.0\n")?;
    let input = staging.join("input.csv");
    std::fs::write(&input, b"id,value\n1,42\n")?;

    // (C) The unit of work: a script plus parameters, one of which
    // references the local data file and gets rewritten on upload.
    let plan: DemoPlan = serde_json::from_value(serde_json::json!({
        "task": {
            "kind": "script",
            "file": "job.py",
            "parameters": ["--input", format!("file://{}", input.display())],
        }
    }))
    .expect("demo plan is valid");
    let task = plan.task;

    // (D) Wire the controller: tracked-run transfer against the local
    // in-memory store, one run per controller.
    let session = Arc::new(EchoSession);
    let mut builder = ExecutionController::builder(session, task)
        .requirements_file(&requirements)
        .upload_via_run_store(Arc::new(InMemoryRunStore::in_temp_dir()));
    builder = match core_artifact {
        Some(artifact) => builder.core_artifact(artifact),
        None => builder.suppress_core_install(true),
    };

    // (E) Run. Every phase prints what it asked the session to do.
    let controller = builder.build().await?;
    controller.run().await?;

    println!("demo run finished");
    Ok(())
}
