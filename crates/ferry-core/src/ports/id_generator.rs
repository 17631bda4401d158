//! IdGenerator port - ID 生成の抽象化
//!
//! Generates the ULID-based IDs used for tracked runs and uploads. The
//! generator takes a [`Clock`] so tests can pin the timestamp part.

use ulid::Ulid;

use crate::domain::ids::{RunId, UploadId};
use crate::ports::Clock;

/// Generates distributed-safe identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate_run_id(&self) -> RunId;

    fn generate_upload_id(&self) -> UploadId;
}

/// ULID-based generator: timestamp from the clock, randomness from `rand`.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_run_id(&self) -> RunId {
        RunId::from(self.next_ulid())
    }

    fn generate_upload_id(&self) -> UploadId {
        UploadId::from(self.next_ulid())
    }
}
