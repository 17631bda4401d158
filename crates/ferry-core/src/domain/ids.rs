//! Domain identifiers (strongly-typed IDs).
//!
//! ULID-based IDs with a phantom-type marker so a `RunId` and an `UploadId`
//! can never be mixed up at compile time.
//!
//! ULID の特性: timestamp が先頭にあるため生成順にソートでき、調整なしで
//! 複数ノードから生成できる。サイズは UUID と同じ 128-bit。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for each ID type.
///
/// Provides the prefix used by `Display` ("run-", "upload-").
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic ID type.
///
/// `T` is `PhantomData`: it consumes no memory at runtime but keeps the ID
/// types distinct at compile time.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Marker for a tracked run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Run {}

impl IdMarker for Run {
    fn prefix() -> &'static str {
        "run-"
    }
}

/// Marker for a single artifact upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Upload {}

impl IdMarker for Upload {
    fn prefix() -> &'static str {
        "upload-"
    }
}

/// Identifier of a tracked run (opened at controller construction when the
/// artifact-store transfer is selected).
pub type RunId = Id<Run>;

/// Identifier of one artifact upload (also used to name remote staging
/// directories, so two uploads of the same file never collide).
pub type UploadId = Id<Upload>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let ulid1 = Ulid::new();
        let ulid2 = Ulid::new();

        let run = RunId::from_ulid(ulid1);
        let upload = UploadId::from_ulid(ulid2);

        assert_eq!(run.as_ulid(), ulid1);
        assert_eq!(upload.as_ulid(), ulid2);

        assert!(run.to_string().starts_with("run-"));
        assert!(upload.to_string().starts_with("upload-"));

        // The whole point: you can't accidentally mix these types.
        // (This is a compile-time property, so we just keep it as a comment.)
        // let _: RunId = upload; // <- does not compile
    }

    #[test]
    fn ulid_ids_are_sortable() {
        // ULID は時刻ベースなので、生成順序でソート可能
        let id1 = RunId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RunId::from_ulid(Ulid::new());

        assert!(id1 < id2);
    }

    #[test]
    fn ulid_ids_can_be_serialized() {
        let run_id = RunId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&run_id).unwrap();
        let deserialized: RunId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(run_id, deserialized);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<RunId>(), size_of::<Ulid>());
        assert_eq!(size_of::<UploadId>(), size_of::<Ulid>());
        assert_eq!(size_of::<Ulid>(), 16);
    }
}
