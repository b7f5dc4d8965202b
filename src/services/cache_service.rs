use std::future::Future;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::api::FetchError;
use crate::models::{CachedSnapshot, Record};

/// Default snapshot time-to-live: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3_600_000);

/// Anything that can produce a fresh set of records.
pub trait RecordSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Record>, FetchError>> + Send;
}

/// Serves records from a single cached snapshot, refetching when it is stale.
///
/// The snapshot lock is only held to read or replace the value. Fetches are
/// serialized by a separate refresh lock, so concurrent readers of an expired
/// cache share one upstream call while fresh reads never wait on a fetch.
pub struct CacheService<S> {
    source: S,
    ttl: Duration,
    snapshot: RwLock<CachedSnapshot>,
    refresh: Mutex<()>,
}

impl<S: RecordSource> CacheService<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: RwLock::new(CachedSnapshot::empty()),
            refresh: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn fresh_records(&self) -> Option<Vec<Record>> {
        self.snapshot.read().await.fresh(self.ttl).map(<[Record]>::to_vec)
    }

    /// Returns the cached records, fetching first if there are none or they
    /// are older than the TTL. A failed fetch is returned as an error and the
    /// previous snapshot, stale or not, is left in place.
    pub async fn get_data(&self) -> Result<Vec<Record>, FetchError> {
        if let Some(records) = self.fresh_records().await {
            debug!("Cache hit, serving {} records", records.len());
            return Ok(records);
        }

        let _refresh = self.refresh.lock().await;
        // Another request may have refetched while we waited.
        if let Some(records) = self.fresh_records().await {
            debug!("Cache filled by concurrent fetch, serving {} records", records.len());
            return Ok(records);
        }

        if self.snapshot.read().await.value.is_some() {
            info!("Cache expired. Fetching new data...");
        } else {
            info!("Cache empty. Fetching data...");
        }
        let records = self.source.fetch().await.inspect_err(|e| {
            error!(error = %e, "Failed to fetch data");
        })?;
        self.snapshot.write().await.replace(records.clone());

        Ok(records)
    }

    /// Fetches unconditionally and overwrites the snapshot on success.
    /// Readers keep getting the current snapshot while the fetch runs.
    pub async fn force_refresh(&self) -> Result<Vec<Record>, FetchError> {
        let _refresh = self.refresh.lock().await;

        info!("Refreshing cache");
        let records = self.source.fetch().await.inspect_err(|e| {
            error!(error = %e, "Cache refresh failed");
        })?;
        self.snapshot.write().await.replace(records.clone());

        Ok(records)
    }

    /// Current snapshot, for inspection.
    pub async fn snapshot(&self) -> CachedSnapshot {
        self.snapshot.read().await.clone()
    }
}
