mod sweeper;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use crate::tree::MediaEntry;
use sweeper::Sweeper;

/// Default lifetime of a cached listing
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default pause between eviction sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Directory cache timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a listing stays valid after it was written
    pub ttl: Duration,
    /// How often the background sweeper purges expired listings
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

type ListingCache = Cache<PathBuf, Arc<[MediaEntry]>>;

/// Time-to-live cache of directory listings
///
/// An expired listing reads as a miss. Expired entries are also purged by a
/// background sweeper that runs until [`DirectoryCache::shutdown`] or drop.
#[derive(Debug)]
pub struct DirectoryCache {
    listings: ListingCache,
    sweeper: Mutex<Option<Sweeper>>,
}

impl DirectoryCache {
    pub fn new(config: CacheConfig) -> Self {
        let listings = Cache::builder().time_to_live(config.ttl).build();
        let sweeper = Sweeper::spawn(listings.clone(), config.sweep_interval);

        Self {
            listings,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Cached listing for `path`, if present and not expired
    pub fn get(&self, path: &Path) -> Option<Arc<[MediaEntry]>> {
        self.listings.get(path)
    }

    /// Store a listing, valid for the configured TTL from now
    pub fn insert(&self, path: PathBuf, entries: impl Into<Arc<[MediaEntry]>>) {
        self.listings.insert(path, entries.into());
    }

    pub fn invalidate(&self, path: &Path) {
        self.listings.invalidate(path);
    }

    /// Apply pending writes and evict every expired listing
    pub fn purge_expired(&self) {
        purge_expired(&self.listings);
    }

    /// Number of stored listings as of the last purge
    pub fn len(&self) -> u64 {
        self.listings.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop the background sweeper. Lookups keep working afterwards.
    pub fn shutdown(&self) {
        let sweeper = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sweeper) = sweeper {
            sweeper.stop();
        }
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for DirectoryCache {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn purge_expired(listings: &ListingCache) {
    let before = listings.entry_count();
    listings.run_pending_tasks();
    let after = listings.entry_count();
    if after < before {
        debug!(purged = before - after, "Evicted expired directory listings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;
    use std::time::Instant;

    fn listing() -> Vec<MediaEntry> {
        vec![
            MediaEntry::new("Show".into(), PathBuf::from("/m/Show"), NodeKind::Directory),
            MediaEntry::new("a.mp4".into(), PathBuf::from("/m/a.mp4"), NodeKind::Video),
        ]
    }

    fn short_lived(ttl_ms: u64, sweep_ms: u64) -> DirectoryCache {
        DirectoryCache::new(CacheConfig {
            ttl: Duration::from_millis(ttl_ms),
            sweep_interval: Duration::from_millis(sweep_ms),
        })
    }

    #[test]
    fn test_round_trip() {
        let cache = DirectoryCache::new(CacheConfig::default());
        cache.insert(PathBuf::from("/m"), listing());

        let cached = cache.get(Path::new("/m")).unwrap();
        assert_eq!(&cached[..], &listing()[..]);
        assert!(cache.get(Path::new("/other")).is_none());
    }

    #[test]
    fn test_expired_listing_is_a_miss() {
        let cache = short_lived(30, 60_000);
        cache.insert(PathBuf::from("/m"), listing());
        assert!(cache.get(Path::new("/m")).is_some());

        std::thread::sleep(Duration::from_millis(60));

        assert!(cache.get(Path::new("/m")).is_none());
        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = short_lived(40, 60_000);
        cache.insert(PathBuf::from("/a"), listing());
        cache.insert(PathBuf::from("/b"), listing());
        std::thread::sleep(Duration::from_millis(80));
        cache.insert(PathBuf::from("/c"), listing());

        cache.purge_expired();
        assert_eq!(cache.len(), 1);
        assert!(cache.get(Path::new("/c")).is_some());
    }

    #[test]
    fn test_sweeper_evicts_in_background() {
        let cache = short_lived(50, 20);
        cache.insert(PathBuf::from("/m"), listing());
        cache.purge_expired();
        assert_eq!(cache.len(), 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !cache.is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }

        assert!(cache.is_empty());
    }

    #[test]
    fn test_shutdown_stops_sweeper() {
        let cache = short_lived(10, 20);
        assert!(cache.is_sweeping());
        cache.shutdown();
        assert!(!cache.is_sweeping());

        cache.insert(PathBuf::from("/m"), listing());
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get(Path::new("/m")).is_none());
    }

    #[test]
    fn test_invalidate() {
        let cache = DirectoryCache::new(CacheConfig::default());
        cache.insert(PathBuf::from("/m"), listing());
        cache.invalidate(Path::new("/m"));
        assert!(cache.get(Path::new("/m")).is_none());
    }
}
