//! Retrieval and holding of Gatelogue snapshots.
//!
//! [`SnapshotStore`] fetches a published snapshot, decodes it with
//! `gatelogue-types` and hands out shared, immutable views of it.

pub mod error;
pub mod fetch;
pub mod source;
pub mod store;

pub use error::{ClientError, Result};
pub use fetch::{DataFetcher, FileFetcher, ReqwestFetcher};
pub use source::DataSource;
pub use store::{fetch_no_sources, fetch_with_sources, Snapshot, SnapshotStore, SnapshotWatcher};

pub use gatelogue_types as types;
