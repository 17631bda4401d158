//! ContextTransfer - session-attached file transfer.
//!
//! Streams a local file to the remote side through the session's own command
//! channel: the bytes are base64-encoded and appended chunk by chunk into a
//! staging path on the remote filesystem. No artifact store is involved and
//! no tracked run is opened.
//!
//! # Implementation details
//! - Each upload gets its own staging directory named after a fresh
//!   `UploadId`, so re-uploading the same file never collides.
//! - Chunks stay well under typical command-size limits.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::info;

use crate::domain::FerryError;
use crate::ports::{
    IdGenerator, RemoteExecutionClient, SystemClock, TransferStrategy, UlidGenerator,
};

/// Remote directory uploads are staged under.
pub const REMOTE_STAGING_ROOT: &str = "/tmp/ferry-staging";

/// Raw bytes per append command (base64 inflates this by ~4/3).
const UPLOAD_CHUNK_BYTES: usize = 512 * 1024;

pub struct ContextTransfer {
    client: Arc<dyn RemoteExecutionClient>,
    ids: Box<dyn IdGenerator>,
}

impl ContextTransfer {
    pub fn new(client: Arc<dyn RemoteExecutionClient>) -> Self {
        Self {
            client,
            ids: Box::new(UlidGenerator::new(SystemClock)),
        }
    }

    pub fn with_id_generator(
        client: Arc<dyn RemoteExecutionClient>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self { client, ids }
    }
}

#[async_trait]
impl TransferStrategy for ContextTransfer {
    async fn upload_and_provide_path(&self, local: &Path) -> Result<String, FerryError> {
        let bytes = tokio::fs::read(local).await?;
        let file_name = local
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                FerryError::transfer(format!("not an uploadable file path: {}", local.display()))
            })?;

        let upload_id = self.ids.generate_upload_id();
        let remote_dir = format!("{REMOTE_STAGING_ROOT}/{upload_id}");
        let remote_path = format!("{remote_dir}/{file_name}");

        info!(local = %local.display(), remote = %remote_path, "uploading via session context");

        // Staging directory plus an empty target file; chunks append below.
        let prepare = format!(
            "import os\nos.makedirs(\"{remote_dir}\", exist_ok=True)\nopen(\"{remote_path}\", \"wb\").close()"
        );
        self.client.execute_command(&prepare, false).await?;

        for chunk in bytes.chunks(UPLOAD_CHUNK_BYTES) {
            let encoded = BASE64.encode(chunk);
            let append = format!(
                "import base64\nwith open(\"{remote_path}\", \"ab\") as f:\n    f.write(base64.b64decode(\"{encoded}\"))"
            );
            self.client.execute_command(&append, false).await?;
        }

        Ok(remote_path)
    }
}
