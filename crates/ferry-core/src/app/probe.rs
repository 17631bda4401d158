//! RuntimeProbe: ask the remote session which runtime it is, and refresh the
//! interpreter when the runtime supports it.
//!
//! Probing failure is always absorbed here (`Unknown`), never surfaced as a
//! controller error. The restart itself is a regular remote call and its
//! failures propagate.

use tracing::info;

use crate::domain::{FerryError, RuntimeVersion};
use crate::ports::RemoteExecutionClient;

/// Environment variable the remote runtime publishes its version under.
pub const RUNTIME_VERSION_VARIABLE: &str = "RUNTIME_VERSION";

/// Queries the remote session for its runtime version.
pub struct RuntimeProbe;

impl RuntimeProbe {
    /// Execute the fixed introspection command and parse its output.
    ///
    /// Returns `Unknown` on any failure: command error, missing variable,
    /// unparseable output. Never raises.
    pub async fn probe(client: &dyn RemoteExecutionClient) -> RuntimeVersion {
        let command = format!(
            "import os\nprint(os.environ.get(\"{RUNTIME_VERSION_VARIABLE}\"))"
        );
        match client.execute_command(&command, false).await {
            Ok(output) => RuntimeVersion::parse(&output),
            Err(_) => RuntimeVersion::Unknown,
        }
    }
}

/// The runtime-refresh decision, invoked after each install phase.
///
/// Restarts the interpreter when the probed major version is known and at
/// least the refresh threshold, so just-installed libraries become
/// importable. Otherwise skips silently: refresh is an optimization, not a
/// requirement. The restart is synchronous; callers proceed only after it
/// completes.
pub async fn refresh_if_necessary(client: &dyn RemoteExecutionClient) -> Result<(), FerryError> {
    if RuntimeProbe::probe(client).await.supports_refresh() {
        info!("restarting the interpreter to reflect the changes in environment");
        client.restart_interpreter().await?;
        info!("restarting the interpreter - done");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    use crate::domain::TaskParameters;

    /// Minimal session double: canned probe output, restart counter.
    struct ProbeClient {
        probe_output: Result<String, ()>,
        restarts: Mutex<u32>,
    }

    impl ProbeClient {
        fn reporting(output: &str) -> Self {
            Self {
                probe_output: Ok(output.to_string()),
                restarts: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                probe_output: Err(()),
                restarts: Mutex::new(0),
            }
        }

        fn restart_count(&self) -> u32 {
            *self.restarts.lock().unwrap()
        }
    }

    #[async_trait]
    impl RemoteExecutionClient for ProbeClient {
        async fn execute_command(
            &self,
            _command: &str,
            _verbose: bool,
        ) -> Result<String, FerryError> {
            self.probe_output
                .clone()
                .map_err(|_| FerryError::remote("session gone"))
        }

        async fn execute_file(&self, _file: &Path) -> Result<(), FerryError> {
            unreachable!("probe never executes files")
        }

        async fn execute_entry_point(
            &self,
            _package_name: &str,
            _entry_point: &str,
        ) -> Result<(), FerryError> {
            unreachable!("probe never executes entry points")
        }

        async fn install_package(
            &self,
            _remote_path: &str,
            _extras: Option<&str>,
        ) -> Result<(), FerryError> {
            unreachable!("probe never installs")
        }

        async fn setup_arguments(&self, _parameters: &TaskParameters) -> Result<(), FerryError> {
            unreachable!("probe never sets arguments")
        }

        async fn restart_interpreter(&self) -> Result<(), FerryError> {
            *self.restarts.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn probe_parses_reported_version() {
        let client = ProbeClient::reporting("14.3.x-scala2.12");
        assert_eq!(
            RuntimeProbe::probe(&client).await,
            RuntimeVersion::Known(14)
        );
    }

    #[tokio::test]
    async fn probe_absorbs_client_failures() {
        let client = ProbeClient::failing();
        assert_eq!(RuntimeProbe::probe(&client).await, RuntimeVersion::Unknown);
    }

    #[tokio::test]
    async fn refresh_restarts_at_or_above_threshold() {
        let client = ProbeClient::reporting("13.1");
        refresh_if_necessary(&client).await.unwrap();
        assert_eq!(client.restart_count(), 1);
    }

    #[tokio::test]
    async fn refresh_skips_older_runtimes() {
        let client = ProbeClient::reporting("12.2");
        refresh_if_necessary(&client).await.unwrap();
        assert_eq!(client.restart_count(), 0);
    }

    #[tokio::test]
    async fn refresh_skips_when_version_is_unknown() {
        let client = ProbeClient::reporting("None");
        refresh_if_necessary(&client).await.unwrap();
        assert_eq!(client.restart_count(), 0);
    }

    #[tokio::test]
    async fn refresh_skips_when_probe_itself_fails() {
        let client = ProbeClient::failing();
        refresh_if_necessary(&client).await.unwrap();
        assert_eq!(client.restart_count(), 0);
    }
}
