//! Single-flight, time-bounded cache of the aggregated snapshot.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use roster_core::{Snapshot, aggregate, fetch::PagedFetcher};
use tokio::sync::Mutex;
use tracing::debug;

use crate::etag::compute_etag;

/// A snapshot together with its precomputed ETag.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
  pub snapshot: Arc<Snapshot>,
  pub etag:     Arc<str>,
  fetched_at:   Instant,
}

/// Holds the most recent successful snapshot for `ttl`.
///
/// Concurrent callers that miss queue on the same lock, so at most one
/// aggregation runs at a time and the rest observe its result. Failed
/// aggregations are never stored.
pub struct SnapshotCache {
  ttl:  Duration,
  slot: Mutex<Option<CachedSnapshot>>,
}

impl SnapshotCache {
  pub fn new(ttl: Duration) -> Self {
    Self { ttl, slot: Mutex::new(None) }
  }

  pub fn ttl(&self) -> Duration { self.ttl }

  /// Return the cached snapshot, aggregating a fresh one if it is missing or
  /// older than the TTL.
  pub async fn get<F: PagedFetcher>(
    &self,
    fetcher: &F,
  ) -> roster_core::Result<CachedSnapshot> {
    let mut slot = self.slot.lock().await;
    if let Some(cached) = slot.as_ref()
      && cached.fetched_at.elapsed() < self.ttl
    {
      debug!("snapshot cache hit");
      return Ok(cached.clone());
    }

    debug!("snapshot cache miss, aggregating");
    let snapshot = aggregate(fetcher).await?;
    let etag: Arc<str> = compute_etag(&snapshot).into();
    let fresh = CachedSnapshot {
      snapshot: Arc::new(snapshot),
      etag,
      fetched_at: Instant::now(),
    };
    *slot = Some(fresh.clone());
    Ok(fresh)
  }
}
