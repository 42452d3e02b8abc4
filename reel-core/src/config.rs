use std::time::Duration;

use crate::cache::CacheConfig;
use crate::error::{ReelError, Result};
use crate::filter::Filter;

/// Default pause between warm-up progress messages
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Everything a [`crate::MediaTree`] needs to know before loading
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub filter: Filter,
    pub cache: CacheConfig,
    /// How often progress is published while the warm-up scan runs
    pub progress_interval: Duration,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            cache: CacheConfig::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl IndexConfig {
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.filter.max_children == 0 {
            return Err(ReelError::InvalidConfig(
                "max_children must be at least 1".to_string(),
            ));
        }
        if self.cache.ttl.is_zero() {
            return Err(ReelError::InvalidConfig(
                "cache TTL must be greater than zero".to_string(),
            ));
        }
        if self.cache.sweep_interval.is_zero() || self.progress_interval.is_zero() {
            return Err(ReelError::InvalidConfig(
                "sweep and progress intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
