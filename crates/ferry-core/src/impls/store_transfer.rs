//! StoreTransfer - tracked-run artifact-store transfer.
//!
//! Bound to one open run at construction; every upload lands under that
//! run's artifact root. The run itself is opened and closed by the
//! controller, not by this strategy.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{FerryError, RunId};
use crate::ports::{RunStore, TransferStrategy};

pub struct StoreTransfer {
    store: Arc<dyn RunStore>,
    run_id: RunId,
}

impl StoreTransfer {
    pub fn new(store: Arc<dyn RunStore>, run_id: RunId) -> Self {
        Self { store, run_id }
    }
}

#[async_trait]
impl TransferStrategy for StoreTransfer {
    async fn upload_and_provide_path(&self, local: &Path) -> Result<String, FerryError> {
        self.store.put_artifact(&self.run_id, local).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryRunStore;
    use ulid::Ulid;

    #[tokio::test]
    async fn uploads_land_under_the_bound_run() {
        let root = std::env::temp_dir().join(format!("ferry-store-transfer-{}", Ulid::new()));
        let store = Arc::new(InMemoryRunStore::new(&root));
        let run = store.start_run().await.unwrap();

        let local = std::env::temp_dir().join(format!("ferry-st-{}.whl", Ulid::new()));
        std::fs::write(&local, b"wheel").unwrap();

        let transfer = StoreTransfer::new(store.clone(), run.run_id);
        let remote = transfer.upload_and_provide_path(&local).await.unwrap();

        assert!(remote.contains(&run.run_id.to_string()));

        let _ = std::fs::remove_file(&local);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn uploads_to_a_closed_run_fail() {
        let root = std::env::temp_dir().join(format!("ferry-store-transfer-{}", Ulid::new()));
        let store = Arc::new(InMemoryRunStore::new(&root));
        let run = store.start_run().await.unwrap();
        store.end_run(&run.run_id).await.unwrap();

        let local = std::env::temp_dir().join(format!("ferry-st-{}.whl", Ulid::new()));
        std::fs::write(&local, b"wheel").unwrap();

        let transfer = StoreTransfer::new(store, run.run_id);
        assert!(transfer.upload_and_provide_path(&local).await.is_err());

        let _ = std::fs::remove_file(&local);
        let _ = std::fs::remove_dir_all(&root);
    }
}
