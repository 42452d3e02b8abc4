use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::tree::NodeKind;

/// Progress update during the warm-up scan
#[derive(Debug, Clone)]
pub enum LoadMessage {
    /// Periodic progress update
    Progress(IndexStats),
    /// A directory could not be scanned (it shows up empty)
    ScanError { path: PathBuf, message: String },
    /// Warm-up finished, carrying the final counts. Sent exactly once.
    Completed(IndexStats),
}

/// Indexing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of files found
    pub files: u64,
    /// Number of directories found
    pub dirs: u64,
    /// Number of entries or directories that could not be read
    pub errors: u64,
    /// Directory scanned most recently
    pub current_path: Option<PathBuf>,
}

impl IndexStats {
    pub fn total_entries(&self) -> u64 {
        self.files + self.dirs
    }
}

/// Counters shared by every scan of one tree
#[derive(Debug, Default)]
pub struct ScanCounters {
    files: AtomicU64,
    dirs: AtomicU64,
    errors: AtomicU64,
    current_path: Mutex<Option<PathBuf>>,
}

impl ScanCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one indexed entry
    pub fn record(&self, kind: NodeKind) {
        if kind.is_directory() {
            self.dirs.fetch_add(1, Ordering::Relaxed);
        } else {
            self.files.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_current(&self, path: &Path) {
        if let Ok(mut guard) = self.current_path.lock() {
            *guard = Some(path.to_path_buf());
        }
    }

    pub fn snapshot(&self) -> IndexStats {
        IndexStats {
            files: self.files.load(Ordering::Relaxed),
            dirs: self.dirs.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            current_path: self.current_path.lock().ok().and_then(|g| g.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_from_many_threads() {
        let counters = Arc::new(ScanCounters::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        counters.record(NodeKind::Video);
                        counters.record(NodeKind::Directory);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = counters.snapshot();
        assert_eq!(stats.files, 1000);
        assert_eq!(stats.dirs, 1000);
        assert_eq!(stats.total_entries(), 2000);
    }
}
