//! Process-wide memoization of built metadata.
//!
//! Metadata is a pure function of the catalog, the target and the seed, so a
//! built snapshot can be reused until it is older than
//! [`EngineConfig::revalidate_secs`]. The cache is an optimization only; a
//! rebuilt snapshot differs from a cached one at most in bonus display order.

use crate::config::EngineConfig;
use crate::daily::DailySelection;
use crate::error::EngineError;
use crate::metadata::{build_metadata, CountryMetadata};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use worldle_data::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    target_code: String,
    seed: String,
}

#[derive(Debug)]
struct CachedMetadata {
    built_at: DateTime<Utc>,
    metadata: Arc<CountryMetadata>,
}

impl CachedMetadata {
    /// Entries built "in the future" (clock skew) count as fresh.
    fn is_fresh(&self, now: DateTime<Utc>, revalidate_secs: u64) -> bool {
        let age = (now - self.built_at).num_seconds();
        age < 0 || (age as u64) < revalidate_secs
    }
}

/// Snapshots older than the revalidation window are rebuilt on lookup and
/// evicted whenever a new snapshot is stored, so earlier days do not pile up.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: Mutex<HashMap<CacheKey, CachedMetadata>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the snapshot for `selection`, building it if missing or stale.
    pub fn get_or_build(
        &self,
        catalog: &Catalog,
        selection: &DailySelection,
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> Result<Arc<CountryMetadata>, EngineError> {
        let key = CacheKey {
            target_code: selection.target_code.clone(),
            seed: selection.seed(),
        };

        // A poisoned lock only means another caller panicked mid-insert; the
        // map itself is still usable.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = entries.get(&key) {
            if cached.is_fresh(now, config.revalidate_secs) {
                return Ok(Arc::clone(&cached.metadata));
            }
            log::info!(
                "Metadata for {} #{} is stale, rebuilding",
                key.target_code,
                selection.puzzle_number
            );
        } else {
            log::info!(
                "No cached metadata for {} #{}, building",
                key.target_code,
                selection.puzzle_number
            );
        }

        let metadata = Arc::new(build_metadata(catalog, &key.target_code, &key.seed, config)?);
        let before = entries.len();
        entries.retain(|_, cached| cached.is_fresh(now, config.revalidate_secs));
        if entries.len() < before {
            log::debug!("Evicted {} stale metadata snapshots", before - entries.len());
        }
        entries.insert(
            key,
            CachedMetadata {
                built_at: now,
                metadata: Arc::clone(&metadata),
            },
        );
        Ok(metadata)
    }

    /// Drop every cached snapshot.
    pub fn invalidate(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
