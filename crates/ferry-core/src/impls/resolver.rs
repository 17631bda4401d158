//! FileReferenceResolver - built-in parameter resolver.
//!
//! Rewrites parameter values that carry the local `file://` scheme: the
//! referenced file is uploaded through the active transfer strategy and the
//! value is replaced with the returned remote path. Plain values pass
//! through untouched. Richer resolvers (e.g. resolving symbolic artifact
//! names against the artifact set) can be plugged in through the same port.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{ArtifactSet, FerryError, LOCAL_FILE_SCHEME, TaskParameters};
use crate::ports::{ParameterResolver, TransferStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct FileReferenceResolver;

impl FileReferenceResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ParameterResolver for FileReferenceResolver {
    async fn resolve(
        &self,
        _artifacts: &ArtifactSet,
        transfer: &dyn TransferStrategy,
        parameters: &mut TaskParameters,
    ) -> Result<(), FerryError> {
        for value in parameters.values_mut() {
            let Some(local) = value.strip_prefix(LOCAL_FILE_SCHEME) else {
                continue;
            };
            let remote = transfer.upload_and_provide_path(Path::new(local)).await?;
            info!(local, remote = %remote, "rewrote parameter artifact reference");
            *value = remote;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Transfer double: records uploads, answers with a fixed remote form.
    struct FakeTransfer {
        uploads: Mutex<Vec<String>>,
    }

    impl FakeTransfer {
        fn new() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TransferStrategy for FakeTransfer {
        async fn upload_and_provide_path(&self, local: &Path) -> Result<String, FerryError> {
            self.uploads
                .lock()
                .unwrap()
                .push(local.display().to_string());
            Ok(format!("remote:/staged/{}", local.display()))
        }
    }

    fn empty_set() -> ArtifactSet {
        ArtifactSet::new(true, None, None)
    }

    #[tokio::test]
    async fn rewrites_only_file_scheme_positional_values() {
        let transfer = FakeTransfer::new();
        let mut parameters = TaskParameters::Positional(vec![
            "--input".to_string(),
            "file://data/input.csv".to_string(),
            "plain-value".to_string(),
        ]);

        FileReferenceResolver::new()
            .resolve(&empty_set(), &transfer, &mut parameters)
            .await
            .unwrap();

        assert_eq!(
            parameters,
            TaskParameters::Positional(vec![
                "--input".to_string(),
                "remote:/staged/data/input.csv".to_string(),
                "plain-value".to_string(),
            ])
        );
        assert_eq!(*transfer.uploads.lock().unwrap(), vec!["data/input.csv"]);
    }

    #[tokio::test]
    async fn rewrites_named_values_and_leaves_names_alone() {
        let transfer = FakeTransfer::new();
        let mut parameters = TaskParameters::Named(BTreeMap::from([
            ("--config".to_string(), "file://conf/job.yml".to_string()),
            ("--mode".to_string(), "fast".to_string()),
        ]));

        FileReferenceResolver::new()
            .resolve(&empty_set(), &transfer, &mut parameters)
            .await
            .unwrap();

        assert_eq!(
            parameters,
            TaskParameters::Named(BTreeMap::from([
                ("--config".to_string(), "remote:/staged/conf/job.yml".to_string()),
                ("--mode".to_string(), "fast".to_string()),
            ]))
        );
    }

    #[tokio::test]
    async fn no_references_means_no_uploads() {
        let transfer = FakeTransfer::new();
        let mut parameters =
            TaskParameters::Positional(vec!["--mode".to_string(), "fast".to_string()]);

        FileReferenceResolver::new()
            .resolve(&empty_set(), &transfer, &mut parameters)
            .await
            .unwrap();

        assert!(transfer.uploads.lock().unwrap().is_empty());
    }
}
