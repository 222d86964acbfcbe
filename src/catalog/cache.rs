use arc_swap::ArcSwapOption;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::{loader, Catalog, CatalogError};
use crate::metrics;

/// A loaded catalog and when it was loaded
#[derive(Debug)]
pub struct Snapshot {
    pub catalog: Arc<Catalog>,
    pub loaded_at: Instant,
}

/// In-memory catalog with time-based refresh from the backing CSV.
///
/// Readers never block each other: the snapshot is swapped atomically and
/// "check staleness, replace" runs without a lock. Two requests that both see
/// a stale snapshot will both reload the same file, which only costs I/O.
///
/// A failed refresh keeps whatever snapshot was held before, so a broken CSV
/// on disk degrades to stale data rather than an outage once a catalog has
/// been loaded at least once.
pub struct CatalogCache {
    source: PathBuf,
    refresh_interval: Duration,
    current: ArcSwapOption<Snapshot>,
}

impl CatalogCache {
    pub fn new(source: impl Into<PathBuf>, refresh_interval: Duration) -> Self {
        Self {
            source: source.into(),
            refresh_interval,
            current: ArcSwapOption::empty(),
        }
    }

    /// The held catalog, without triggering a load
    pub fn current(&self) -> Option<Arc<Catalog>> {
        self.current.load_full().map(|s| s.catalog.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Return the held catalog, loading it first if absent or stale
    pub async fn get_catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        let held = self.current.load_full();

        if let Some(snapshot) = &held {
            if snapshot.loaded_at.elapsed() < self.refresh_interval {
                return Ok(snapshot.catalog.clone());
            }
        }

        match self.refresh().await {
            Ok(catalog) => Ok(catalog),
            Err(e) => match held {
                Some(snapshot) => {
                    warn!("Catalog refresh failed, serving stale catalog: {}", e);
                    // Restart the interval so the next attempt waits a full period
                    self.current.store(Some(Arc::new(Snapshot {
                        catalog: snapshot.catalog.clone(),
                        loaded_at: Instant::now(),
                    })));
                    Ok(snapshot.catalog.clone())
                }
                None => Err(e),
            },
        }
    }

    /// Load the backing file now, regardless of the held snapshot's age
    pub async fn reload(&self) -> Result<Arc<Catalog>, CatalogError> {
        info!("Forced catalog reload from {}", self.source.display());
        self.refresh().await
    }

    async fn refresh(&self) -> Result<Arc<Catalog>, CatalogError> {
        let path = self.source.clone();
        let result = tokio::task::spawn_blocking(move || loader::load_catalog(&path))
            .await
            .map_err(|e| CatalogError::Join(e.to_string()))?;

        match result {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                metrics::record_catalog_reload("success");
                metrics::set_catalog_size(catalog.len());

                self.current.store(Some(Arc::new(Snapshot {
                    catalog: catalog.clone(),
                    loaded_at: Instant::now(),
                })));
                Ok(catalog)
            }
            Err(e) => {
                metrics::record_catalog_reload("failure");
                warn!("Failed to load catalog from {}: {}", self.source.display(), e);
                Err(e)
            }
        }
    }
}
