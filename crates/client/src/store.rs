//! Holding the current snapshot.
//!
//! A [`SnapshotStore`] publishes immutable [`Snapshot`]s through a watch
//! channel. Readers clone the `Arc` and keep a consistent view for as long
//! as they hold it; a refresh swaps the pointer without touching them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatelogue_types::{GatelogueData, SpatialIndex};
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::error::Result;
use crate::fetch::{DataFetcher, FileFetcher, ReqwestFetcher};
use crate::source::DataSource;

/// A decoded snapshot plus what was derived from it at load time.
pub struct Snapshot {
    pub data: GatelogueData,
    pub spatial: SpatialIndex,
    pub source: DataSource,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(data: GatelogueData, source: DataSource) -> Self {
        let spatial = SpatialIndex::build(&data);
        Self {
            data,
            spatial,
            source,
            fetched_at: Utc::now(),
        }
    }

    pub fn decode(bytes: &[u8], source: DataSource) -> Result<Self> {
        Ok(Self::new(GatelogueData::from_slice(bytes)?, source))
    }
}

pub type SnapshotWatcher = watch::Receiver<Option<Arc<Snapshot>>>;

pub struct SnapshotStore {
    fetcher: Arc<dyn DataFetcher>,
    source: DataSource,
    location: String,
    sender: watch::Sender<Option<Arc<Snapshot>>>,
    /// Held across fetch and install so refreshes land in the order they
    /// started.
    refresh_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Store reading `source` from its published URL through `fetcher`.
    pub fn new(fetcher: Arc<dyn DataFetcher>, source: DataSource) -> Self {
        Self::with_location(fetcher, source, source.url())
    }

    /// Store reading from an explicit location, e.g. a file path for
    /// [`FileFetcher`].
    pub fn with_location(
        fetcher: Arc<dyn DataFetcher>,
        source: DataSource,
        location: impl Into<String>,
    ) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            fetcher,
            source,
            location: location.into(),
            sender,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn remote(source: DataSource) -> Result<Self> {
        Ok(Self::new(Arc::new(ReqwestFetcher::new()?), source))
    }

    pub fn local(source: DataSource, path: impl Into<String>) -> Self {
        Self::with_location(Arc::new(FileFetcher), source, path)
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// The installed snapshot, `None` before the first successful load.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> SnapshotWatcher {
        self.sender.subscribe()
    }

    /// Replace the current snapshot.
    pub fn install(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.sender.send_replace(Some(snapshot.clone()));
        snapshot
    }

    /// Fetch, decode and install a fresh snapshot.
    ///
    /// On failure the previous snapshot stays current and the error is
    /// returned. Concurrent calls run one after another.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let _guard = self.refresh_lock.lock().await;
        let loaded = async {
            let bytes = self.fetcher.fetch(&self.location).await?;
            Snapshot::decode(&bytes, self.source)
        }
        .await;

        match loaded {
            Ok(snapshot) => {
                info!(
                    location = %self.location,
                    nodes = snapshot.data.len(),
                    version = snapshot.data.version,
                    "installed snapshot"
                );
                Ok(self.install(snapshot))
            }
            Err(error) => {
                warn!(location = %self.location, %error, "snapshot refresh failed");
                Err(error)
            }
        }
    }
}

/// One-shot download of `data.json`.
pub async fn fetch_with_sources() -> Result<GatelogueData> {
    fetch(DataSource::WithSources).await
}

/// One-shot download of `data_no_sources.json`.
pub async fn fetch_no_sources() -> Result<GatelogueData> {
    fetch(DataSource::NoSources).await
}

async fn fetch(source: DataSource) -> Result<GatelogueData> {
    let bytes = ReqwestFetcher::new()?.fetch(&source.url()).await?;
    Ok(GatelogueData::from_slice(&bytes)?)
}
