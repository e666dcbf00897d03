//! Read-only dataset snapshots and their time-bounded cache.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use econ_model::{CanonicalObservation, QueryOptions};
use tracing::debug;

use crate::index::SecondaryIndexes;

/// An immutable view of the canonical dataset.
///
/// The `(indicator_type, year)` and `country_code` indexes are built once on
/// creation. Cloning is cheap; every clone shares the same rows and indexes.
#[derive(Debug, Clone)]
pub struct Snapshot {
    observations: Arc<[CanonicalObservation]>,
    indexes: Arc<SecondaryIndexes>,
    loaded_at: Instant,
}

impl Snapshot {
    pub fn new(observations: Vec<CanonicalObservation>) -> Self {
        let indexes = SecondaryIndexes::build(&observations);
        Self {
            observations: observations.into(),
            indexes: Arc::new(indexes),
            loaded_at: Instant::now(),
        }
    }

    pub fn observations(&self) -> &[CanonicalObservation] {
        &self.observations
    }

    pub fn indexes(&self) -> &SecondaryIndexes {
        &self.indexes
    }

    pub fn loaded_at(&self) -> Instant {
        self.loaded_at
    }

    pub fn age(&self) -> Duration {
        self.loaded_at.elapsed()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Holds the current snapshot and replaces it once it is older than the TTL.
///
/// Refresh is time-based only. Readers get an `Arc` and keep using it even
/// if a refresh swaps in a newer snapshot meanwhile.
#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: RwLock::new(None),
        }
    }

    pub fn from_options(options: &QueryOptions) -> Self {
        Self::new(Duration::from_secs(options.snapshot_ttl_secs))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached snapshot, fresh or not.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the cached snapshot, calling `loader` first if none is cached
    /// or the cached one has expired.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error; the previous snapshot stays cached.
    pub fn get_or_refresh<F, E>(&self, loader: F) -> Result<Arc<Snapshot>, E>
    where
        F: FnOnce() -> Result<Vec<CanonicalObservation>, E>,
    {
        if let Some(snapshot) = self.fresh(&self.current()) {
            return Ok(snapshot);
        }

        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // another caller may have refreshed while we waited for the lock
        if let Some(snapshot) = self.fresh(&slot) {
            return Ok(snapshot);
        }
        let snapshot = Arc::new(Snapshot::new(loader()?));
        debug!(observations = snapshot.len(), ttl_secs = self.ttl.as_secs(), "snapshot refreshed");
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drops the cached snapshot so the next call reloads.
    pub fn invalidate(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn fresh(&self, slot: &Option<Arc<Snapshot>>) -> Option<Arc<Snapshot>> {
        slot.as_ref()
            .filter(|snapshot| snapshot.age() < self.ttl)
            .map(Arc::clone)
    }
}
