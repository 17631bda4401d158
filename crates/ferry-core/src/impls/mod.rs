//! Impls - 実装（開発用・組み込み）
//!
//! Concrete implementations of the ports:
//! - **ContextTransfer**: session-attached transfer (command channel)
//! - **StoreTransfer**: tracked-run artifact-store transfer
//! - **InMemoryRunStore**: development/test run store
//! - **FileReferenceResolver**: built-in `file://` parameter resolver
//!
//! Production-grade run stores (object storage, tracking servers) live in
//! separate crates and plug into the same `RunStore` port.

pub mod context_transfer;
pub mod inmem_store;
pub mod resolver;
pub mod store_transfer;

pub use self::context_transfer::{ContextTransfer, REMOTE_STAGING_ROOT};
pub use self::inmem_store::InMemoryRunStore;
pub use self::resolver::FileReferenceResolver;
pub use self::store_transfer::StoreTransfer;
