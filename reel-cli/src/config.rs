//! Configuration file loading and merging.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `<config dir>/reel/config.toml`
//! 3. `$REEL_CONFIG`
//! 4. `--config FILE`
//! 5. Command line flags

use std::path::{Path, PathBuf};
use std::time::Duration;

use reel_core::filter::DEFAULT_MAX_CHILDREN;
use reel_core::{CacheConfig, Filter, IndexConfig};
use serde::Deserialize;

/// Grid width when nothing else is configured
pub const DEFAULT_COLUMNS: usize = 4;

/// Widest grid accepted; larger values are clamped
pub const MAX_COLUMNS: usize = 64;

/// Which entries are indexed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub skip_hidden: Option<bool>,
    /// Replaces the default skip list when set
    pub skip_extensions: Option<Vec<String>>,
    pub max_children: Option<usize>,
}

/// Directory listing cache timing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub ttl_secs: Option<u64>,
    pub sweep_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub columns: Option<usize>,
}

/// All fields are optional so partial configs can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub filter: FilterSection,
    pub cache: CacheSection,
    pub ui: UiSection,
}

/// Config files to try, highest priority first. `--config` is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("REEL_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("reel").join("config.toml"));
    }

    paths
}

/// Read and parse a config file. Missing files are silently skipped; anything
/// unreadable or malformed is reported on stderr and ignored.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            eprintln!(
                "Warning: failed to read config file {}: {}",
                path.display(),
                e
            );
            return None;
        }
    };
    parse(&content, path)
}

fn parse(content: &str, path: &Path) -> Option<AppConfig> {
    match toml::from_str::<AppConfig>(content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            filter: FilterSection {
                skip_hidden: other.filter.skip_hidden.or(self.filter.skip_hidden),
                skip_extensions: other
                    .filter
                    .skip_extensions
                    .clone()
                    .or(self.filter.skip_extensions),
                max_children: other.filter.max_children.or(self.filter.max_children),
            },
            cache: CacheSection {
                ttl_secs: other.cache.ttl_secs.or(self.cache.ttl_secs),
                sweep_interval_secs: other
                    .cache
                    .sweep_interval_secs
                    .or(self.cache.sweep_interval_secs),
            },
            ui: UiSection {
                columns: other.ui.columns.or(self.ui.columns),
            },
        }
    }

    /// Resolve the final configuration from files, then `overrides` from flags
    pub fn load(cli_config_path: Option<&Path>, overrides: &AppConfig) -> AppConfig {
        let mut config = AppConfig::default();

        // Lowest priority first so later files overwrite
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(path) = cli_config_path {
            match load_file(path) {
                Some(file_cfg) => config = config.merge(&file_cfg),
                None if !path.exists() => {
                    eprintln!("Warning: config file {} not found", path.display());
                }
                None => {}
            }
        }

        config.merge(overrides)
    }

    /// Core indexing settings, with defaults for anything left unset
    pub fn index_config(&self) -> IndexConfig {
        let defaults = Filter::default();
        let skip_hidden = self.filter.skip_hidden.unwrap_or(defaults.skip_hidden);
        let filter = match &self.filter.skip_extensions {
            Some(exts) => Filter::new(skip_hidden, exts, DEFAULT_MAX_CHILDREN),
            None => defaults.with_skip_hidden(skip_hidden),
        }
        .with_max_children(self.filter.max_children.unwrap_or(DEFAULT_MAX_CHILDREN));

        let mut cache = CacheConfig::default();
        if let Some(secs) = self.cache.ttl_secs {
            cache.ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = self.cache.sweep_interval_secs {
            cache.sweep_interval = Duration::from_secs(secs);
        }

        IndexConfig::default().with_filter(filter).with_cache(cache)
    }

    pub fn columns(&self) -> usize {
        self.ui.columns.unwrap_or(DEFAULT_COLUMNS).clamp(1, MAX_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_file() {
        let cfg = parse(
            r#"
            [filter]
            skip_hidden = false
            skip_extensions = [".srt"]
            max_children = 50

            [cache]
            ttl_secs = 10
            sweep_interval_secs = 2

            [ui]
            columns = 6
            "#,
            Path::new("test.toml"),
        )
        .unwrap();

        assert_eq!(cfg.filter.skip_hidden, Some(false));
        assert_eq!(cfg.filter.skip_extensions, Some(vec![".srt".to_string()]));
        assert_eq!(cfg.cache.ttl_secs, Some(10));
        assert_eq!(cfg.columns(), 6);
    }

    #[test]
    fn test_parse_partial_file() {
        let cfg = parse("[ui]\ncolumns = 3\n", Path::new("test.toml")).unwrap();
        assert_eq!(cfg.ui.columns, Some(3));
        assert_eq!(cfg.filter, FilterSection::default());
    }

    #[test]
    fn test_parse_invalid_file() {
        assert!(parse("[ui\ncolumns = ", Path::new("bad.toml")).is_none());
        assert!(parse("[ui]\ncolumns = \"four\"\n", Path::new("bad.toml")).is_none());
    }

    #[test]
    fn test_merge_other_wins() {
        let base = AppConfig {
            filter: FilterSection {
                skip_hidden: Some(true),
                max_children: Some(10),
                ..Default::default()
            },
            ui: UiSection { columns: Some(2) },
            ..Default::default()
        };
        let over = AppConfig {
            ui: UiSection { columns: Some(5) },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.ui.columns, Some(5));
        assert_eq!(merged.filter.skip_hidden, Some(true));
        assert_eq!(merged.filter.max_children, Some(10));
    }

    #[test]
    fn test_explicit_file_then_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\ncolumns = 7\n[cache]\nttl_secs = 60").unwrap();

        let overrides = AppConfig {
            cache: CacheSection {
                ttl_secs: Some(5),
                ..Default::default()
            },
            ..Default::default()
        };
        let cfg = AppConfig::load(Some(file.path()), &overrides);

        assert_eq!(cfg.columns(), 7);
        assert_eq!(cfg.index_config().cache.ttl, Duration::from_secs(5));
    }

    #[test]
    fn test_index_config_defaults() {
        let index = AppConfig::default().index_config();
        assert_eq!(index.filter, Filter::default());
        assert_eq!(index.cache, CacheConfig::default());
        assert_eq!(AppConfig::default().columns(), DEFAULT_COLUMNS);
    }

    #[test]
    fn test_index_config_custom_filter() {
        let cfg = AppConfig {
            filter: FilterSection {
                skip_hidden: Some(false),
                skip_extensions: Some(vec!["SRT".to_string()]),
                max_children: Some(20),
            },
            ..Default::default()
        };
        let filter = cfg.index_config().filter;

        assert!(!filter.skip_hidden);
        assert_eq!(filter.max_children, 20);
        assert!(filter.should_skip("movie.srt", false));
        assert!(!filter.should_skip("movie.nfo", false));
    }

    #[test]
    fn test_zero_columns_clamped() {
        let cfg = AppConfig {
            ui: UiSection { columns: Some(0) },
            ..Default::default()
        };
        assert_eq!(cfg.columns(), 1);
    }

    #[test]
    fn test_huge_columns_clamped() {
        let cfg = AppConfig {
            ui: UiSection { columns: Some(65536) },
            ..Default::default()
        };
        assert_eq!(cfg.columns(), MAX_COLUMNS);
    }
}
