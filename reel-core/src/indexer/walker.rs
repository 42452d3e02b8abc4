use std::collections::HashMap;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, warn};

use super::progress::ScanCounters;
use crate::error::ReelError;
use crate::filter::{Filter, poster_base_name};
use crate::tree::{MediaEntry, NodeKind};

/// Result of listing one directory
#[derive(Debug, Default)]
pub struct Listing {
    /// Children in listing order, posters already associated
    pub entries: Vec<MediaEntry>,
    /// First error hit while listing; entries may be partial or empty
    pub error: Option<ReelError>,
}

/// One-level directory scanner
#[derive(Debug, Clone)]
pub struct Indexer {
    filter: Filter,
}

impl Indexer {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }

    /// List the direct children of `dir`
    ///
    /// Never descends into subdirectories. Poster images are folded into the
    /// entries they describe instead of being listed.
    pub fn scan_one_level(&self, dir: &Path, counters: &ScanCounters) -> Listing {
        counters.set_current(dir);

        let walker = WalkDir::new(dir)
            .max_depth(1)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(Parallelism::Serial);

        let mut entries = Vec::new();
        let mut posters: HashMap<String, PathBuf> = HashMap::new();
        let mut error = None;

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    counters.record_error();
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                    if error.is_none() {
                        error = Some(ReelError::ScanIo {
                            path,
                            message: e.to_string(),
                        });
                    }
                    continue;
                }
            };

            // Skip the directory itself
            if entry.depth == 0 {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let is_directory = entry.file_type().is_dir();

            if self.filter.should_skip(&name, is_directory) {
                continue;
            }

            if let Some(base) = poster_base_name(&name) {
                posters.entry(base.to_string()).or_insert_with(|| entry.path());
                continue;
            }

            let kind = NodeKind::classify(&name, is_directory);
            counters.record(kind);
            entries.push(MediaEntry::new(name, entry.path(), kind));
        }

        sort_entries(&mut entries);
        associate_posters(&mut entries, &posters);

        if entries.len() > self.filter.max_children {
            debug!(
                path = %dir.display(),
                found = entries.len(),
                cap = self.filter.max_children,
                "Truncating directory listing"
            );
            entries.truncate(self.filter.max_children);
        }

        Listing { entries, error }
    }
}

/// Directories first, then case-insensitive name, then exact name
pub fn sort_entries(entries: &mut [MediaEntry]) {
    entries.sort_by(|a, b| {
        b.kind
            .is_directory()
            .cmp(&a.kind.is_directory())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Attach posters from `posters` (base name -> poster path) to `entries`
///
/// An entry matches on its name without extension. A directory with no such
/// match also tries its full name, so `Show.2020/` picks up
/// `Show.2020-poster.jpg`. Nothing inside a directory is consulted.
pub fn associate_posters(entries: &mut [MediaEntry], posters: &HashMap<String, PathBuf>) {
    if posters.is_empty() {
        return;
    }

    for entry in entries.iter_mut() {
        let poster = posters.get(entry.base_name()).or_else(|| {
            if entry.kind.is_directory() {
                posters.get(entry.name.as_str())
            } else {
                None
            }
        });

        if let Some(poster) = poster {
            entry.poster = Some(poster.clone());
        }
    }
}
