use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use super::arena::NodeArena;
use super::loader::{self, LoadTask};
use super::node::{MediaEntry, MediaNode, NodeId};
use crate::cache::DirectoryCache;
use crate::config::IndexConfig;
use crate::error::{ReelError, Result};
use crate::indexer::{IndexStats, Indexer, LoadMessage, ScanCounters};

/// Cursor movement over the visible grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What [`MediaTree::enter`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Nothing is selected
    Nothing,
    /// The selection is a file; the caller decides what opening means
    Activated(PathBuf),
    /// The selected directory became the current directory
    Entered(PathBuf),
}

/// Current directory, selection and the snapshot shown to the consumer
#[derive(Debug)]
struct Cursor {
    current: NodeId,
    selected: Option<usize>,
    visible: Vec<MediaNode>,
}

struct Shared {
    root_path: PathBuf,
    arena: RwLock<NodeArena>,
    cursor: Mutex<Cursor>,
    indexer: Indexer,
    cache: DirectoryCache,
    counters: ScanCounters,
    loading: AtomicBool,
}

/// Media index with a navigation cursor
///
/// Cloning yields another handle to the same tree. Lock order is cursor
/// before arena; no lock is held while a directory is being read.
#[derive(Clone)]
pub struct MediaTree {
    shared: Arc<Shared>,
}

impl MediaTree {
    /// Validate `root` and start the background warm-up scan
    ///
    /// Returns immediately. The current directory is the root, whose listing
    /// stays empty until the warm-up has scanned it.
    pub fn load(root: impl Into<PathBuf>, config: IndexConfig) -> Result<(Self, LoadTask)> {
        config.validate()?;

        let root = root.into();
        let metadata = match std::fs::metadata(&root) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReelError::RootNotFound(root));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(ReelError::NotADirectory(root));
        }
        let root = root.canonicalize().unwrap_or(root);

        let tree = Self {
            shared: Arc::new(Shared {
                arena: RwLock::new(NodeArena::new(root.clone())),
                cursor: Mutex::new(Cursor {
                    current: NodeId::ROOT,
                    selected: None,
                    visible: Vec::new(),
                }),
                indexer: Indexer::new(config.filter.clone()),
                cache: DirectoryCache::new(config.cache),
                counters: ScanCounters::new(),
                loading: AtomicBool::new(true),
                root_path: root,
            }),
        };

        let task = loader::spawn(tree.clone(), config.progress_interval);
        tree.refresh_visible();
        Ok((tree, task))
    }

    /// Same as [`MediaTree::load`], reporting through callbacks
    ///
    /// `on_progress(files, dirs)` fires for every progress message and once
    /// more with the final counts right after `on_complete`, which fires
    /// exactly once when the warm-up is done.
    pub fn load_with_callbacks<P, C>(
        root: impl Into<PathBuf>,
        config: IndexConfig,
        mut on_progress: P,
        on_complete: C,
    ) -> Result<(Self, JoinHandle<()>)>
    where
        P: FnMut(u64, u64) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let (tree, task) = Self::load(root, config)?;

        let handle = std::thread::spawn(move || {
            for msg in task.receiver().iter() {
                match msg {
                    LoadMessage::Progress(stats) => on_progress(stats.files, stats.dirs),
                    LoadMessage::Completed(stats) => {
                        on_complete();
                        on_progress(stats.files, stats.dirs);
                        break;
                    }
                    LoadMessage::ScanError { .. } => {}
                }
            }
            let _ = task.wait();
        });

        Ok((tree, handle))
    }

    fn arena(&self) -> RwLockReadGuard<'_, NodeArena> {
        self.shared
            .arena
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn arena_mut(&self) -> RwLockWriteGuard<'_, NodeArena> {
        self.shared
            .arena
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn cursor(&self) -> MutexGuard<'_, Cursor> {
        self.shared
            .cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Warm-up body, run on the loader thread
    pub(super) fn warm_up(&self, events: &Sender<LoadMessage>) -> IndexStats {
        info!(root = %self.shared.root_path.display(), "Starting warm-up scan");

        let mut pending = vec![NodeId::ROOT];
        while let Some(dir) = pending.pop() {
            let children = self.load_directory(dir, Some(events));
            let subdirs: Vec<NodeId> = {
                let arena = self.arena();
                children
                    .into_iter()
                    .filter(|id| arena.get(*id).is_some_and(MediaNode::is_directory))
                    .collect()
            };
            // Depth-first, in listing order
            pending.extend(subdirs.into_iter().rev());
        }

        self.shared.loading.store(false, Ordering::SeqCst);
        self.refresh_if_current(NodeId::ROOT);

        let stats = self.stats();
        info!(
            files = stats.files,
            dirs = stats.dirs,
            errors = stats.errors,
            "Warm-up scan complete"
        );
        stats
    }

    /// List a directory through the cache and swap in its children
    fn load_directory(&self, dir: NodeId, events: Option<&Sender<LoadMessage>>) -> Vec<NodeId> {
        let path = match self.arena().get(dir) {
            Some(node) if node.is_directory() => node.path.clone(),
            _ => return Vec::new(),
        };

        let entries = self.list_directory(&path, events);
        let children = self.arena_mut().replace_children(dir, &entries);
        self.refresh_if_current(dir);
        children
    }

    fn list_directory(&self, path: &Path, events: Option<&Sender<LoadMessage>>) -> Arc<[MediaEntry]> {
        if let Some(entries) = self.shared.cache.get(path) {
            debug!(path = %path.display(), "Cache hit");
            return entries;
        }

        debug!(path = %path.display(), "Scanning directory");
        let listing = self
            .shared
            .indexer
            .scan_one_level(path, &self.shared.counters);
        let entries: Arc<[MediaEntry]> = listing.entries.into();

        match listing.error {
            Some(error) => {
                warn!(path = %path.display(), %error, "Directory listed with errors");
                if let Some(tx) = events {
                    let _ = tx.send(LoadMessage::ScanError {
                        path: path.to_path_buf(),
                        message: error.to_string(),
                    });
                }
            }
            None => self.shared.cache.insert(path.to_path_buf(), Arc::clone(&entries)),
        }

        entries
    }

    fn refresh_if_current(&self, dir: NodeId) {
        let mut cursor = self.cursor();
        if cursor.current == dir {
            self.refresh_locked(&mut cursor);
        }
    }

    fn refresh_locked(&self, cursor: &mut Cursor) {
        cursor.visible = self.arena().children_snapshot(cursor.current);
        cursor.selected = match cursor.visible.len() {
            0 => None,
            len => Some(cursor.selected.unwrap_or(0).min(len - 1)),
        };
    }

    /// Re-copy the current directory's children into the visible snapshot
    pub fn refresh_visible(&self) {
        let mut cursor = self.cursor();
        self.refresh_locked(&mut cursor);
    }

    /// Open the selected node
    ///
    /// Directories are re-listed (cache first, then disk) before they become
    /// current; files are only reported back.
    pub fn enter(&self) -> EnterOutcome {
        let selected = {
            let cursor = self.cursor();
            match cursor.selected.and_then(|i| cursor.visible.get(i)) {
                Some(node) => node.clone(),
                None => return EnterOutcome::Nothing,
            }
        };

        if !selected.is_directory() {
            info!(path = %selected.path.display(), "Selected file");
            return EnterOutcome::Activated(selected.path);
        }

        self.load_directory(selected.id, None);

        let mut cursor = self.cursor();
        cursor.current = selected.id;
        cursor.selected = Some(0);
        self.refresh_locked(&mut cursor);

        EnterOutcome::Entered(selected.path)
    }

    /// Drop the cached listing for `path`; the next visit reads the disk
    pub fn invalidate(&self, path: &Path) {
        self.shared.cache.invalidate(path);
    }

    /// Re-read the current directory from disk, bypassing the cache
    pub fn rescan_current(&self) {
        let current = self.cursor().current;
        if let Some(path) = self.arena().get(current).map(|n| n.path.clone()) {
            self.shared.cache.invalidate(&path);
        }
        self.load_directory(current, None);
    }

    /// Move to the parent directory. Returns false at the root.
    pub fn go_up(&self) -> bool {
        let mut cursor = self.cursor();
        let Some(parent) = self.arena().get(cursor.current).and_then(|n| n.parent) else {
            return false;
        };

        cursor.current = parent;
        cursor.selected = Some(0);
        self.refresh_locked(&mut cursor);
        true
    }

    /// Move the selection over a row-major grid `columns` wide
    ///
    /// Moves that would leave the grid are ignored; nothing wraps.
    pub fn navigate(&self, direction: Direction, columns: usize) {
        let columns = columns.max(1);
        let mut cursor = self.cursor();
        let Some(selected) = cursor.selected else {
            return;
        };
        let last = cursor.visible.len().saturating_sub(1);

        let target = match direction {
            Direction::Up => selected.checked_sub(columns),
            Direction::Down => selected.checked_add(columns).filter(|&i| i <= last),
            Direction::Left => selected.checked_sub(1),
            Direction::Right => selected.checked_add(1).filter(|&i| i <= last),
        };

        if let Some(target) = target {
            cursor.selected = Some(target);
        }
    }

    /// Select a visible node directly. Returns false if out of range.
    pub fn select(&self, index: usize) -> bool {
        let mut cursor = self.cursor();
        if index < cursor.visible.len() {
            cursor.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Snapshot of the current directory's children
    pub fn visible_nodes(&self) -> Vec<MediaNode> {
        self.cursor().visible.clone()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.cursor().selected
    }

    pub fn selected_node(&self) -> Option<MediaNode> {
        let cursor = self.cursor();
        cursor
            .selected
            .and_then(|i| cursor.visible.get(i))
            .cloned()
    }

    pub fn current_directory(&self) -> Option<MediaNode> {
        let current = self.cursor().current;
        self.arena().get(current).cloned()
    }

    pub fn current_directory_path(&self) -> PathBuf {
        self.current_directory()
            .map(|node| node.path)
            .unwrap_or_else(|| self.shared.root_path.clone())
    }

    /// Names from the root down to the current directory, joined by `/`
    pub fn breadcrumbs(&self) -> String {
        let current = self.cursor().current;
        self.arena().breadcrumbs(current)
    }

    pub fn root_path(&self) -> &Path {
        &self.shared.root_path
    }

    pub fn node(&self, id: NodeId) -> Option<MediaNode> {
        self.arena().get(id).cloned()
    }

    /// Live node for a path, if it has been indexed
    pub fn lookup(&self, path: &Path) -> Option<MediaNode> {
        let arena = self.arena();
        arena.lookup(path).and_then(|id| arena.get(id).cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.shared.loading.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> IndexStats {
        self.shared.counters.snapshot()
    }

    /// Stop background cache eviction. In-flight scans run to completion.
    pub fn shutdown(&self) {
        self.shared.cache.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.mp4"), "").unwrap();
        fs::write(temp.path().join("a-poster.jpg"), "").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/b.mkv"), "").unwrap();
        temp
    }

    fn loaded(path: &Path) -> MediaTree {
        let (tree, task) = MediaTree::load(path, IndexConfig::default()).unwrap();
        task.wait().unwrap();
        tree
    }

    fn grid(count: usize) -> (TempDir, MediaTree) {
        let temp = TempDir::new().unwrap();
        for i in 0..count {
            fs::write(temp.path().join(format!("clip{i:02}.mp4")), "").unwrap();
        }
        let tree = loaded(temp.path());
        (temp, tree)
    }

    #[test]
    fn test_load_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = MediaTree::load(temp.path().join("missing"), IndexConfig::default());
        assert!(matches!(result, Err(ReelError::RootNotFound(_))));
    }

    #[test]
    fn test_load_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.mp4");
        fs::write(&file, "").unwrap();
        let result = MediaTree::load(&file, IndexConfig::default());
        assert!(matches!(result, Err(ReelError::NotADirectory(_))));
    }

    #[test]
    fn test_completion_populates_root() {
        let temp = fixture();
        let tree = loaded(temp.path());

        assert!(!tree.is_loading());
        let visible = tree.visible_nodes();
        let names: Vec<_> = visible.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["sub", "a.mp4"]);
        assert_eq!(tree.selected_index(), Some(0));

        let stats = tree.stats();
        assert_eq!(stats.files, 2);
        assert_eq!(stats.dirs, 1);
    }

    #[test]
    fn test_empty_root_has_no_selection() {
        let temp = TempDir::new().unwrap();
        let tree = loaded(temp.path());
        assert!(tree.visible_nodes().is_empty());
        assert_eq!(tree.selected_index(), None);
        assert_eq!(tree.enter(), EnterOutcome::Nothing);
    }

    #[test]
    fn test_enter_file_is_activation() {
        let temp = fixture();
        let tree = loaded(temp.path());
        let before = tree.stats();

        assert!(tree.select(1));
        let outcome = tree.enter();

        assert_eq!(outcome, EnterOutcome::Activated(tree.root_path().join("a.mp4")));
        assert_eq!(tree.current_directory_path(), tree.root_path());
        assert_eq!(tree.selected_index(), Some(1));
        assert_eq!(tree.stats(), before);
    }

    #[test]
    fn test_go_up_at_root_is_noop() {
        let temp = fixture();
        let tree = loaded(temp.path());
        tree.navigate(Direction::Right, 4);

        assert!(!tree.go_up());
        assert_eq!(tree.current_directory_path(), tree.root_path());
        assert_eq!(tree.selected_index(), Some(1));
    }

    #[test]
    fn test_go_up_restores_parent() {
        let temp = fixture();
        fs::write(temp.path().join("sub/c.mp4"), "").unwrap();
        let tree = loaded(temp.path());
        let root = tree.current_directory().unwrap();

        tree.enter();
        tree.navigate(Direction::Right, 4);
        assert_eq!(tree.selected_index(), Some(1));

        assert!(tree.go_up());
        assert_eq!(tree.current_directory().unwrap().id, root.id);
        assert_eq!(tree.selected_index(), Some(0));
    }

    #[test]
    fn test_enter_rescans_changed_directory() {
        let temp = fixture();
        let config = IndexConfig::default().with_cache(crate::cache::CacheConfig {
            ttl: std::time::Duration::from_millis(20),
            ..Default::default()
        });
        let (tree, task) = MediaTree::load(temp.path(), config).unwrap();
        task.wait().unwrap();

        fs::write(temp.path().join("sub/new.mkv"), "").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(50));

        tree.enter();
        let names: Vec<_> = tree.visible_nodes().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["b.mkv", "new.mkv"]);
    }

    #[test]
    fn test_enter_within_ttl_uses_cached_listing() {
        let temp = fixture();
        let tree = loaded(temp.path());

        fs::write(temp.path().join("sub/late.mkv"), "").unwrap();
        tree.enter();

        let names: Vec<_> = tree.visible_nodes().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["b.mkv"]);
    }

    #[test]
    fn test_rescan_current_sees_new_files() {
        let temp = fixture();
        let tree = loaded(temp.path());

        fs::write(temp.path().join("c.avi"), "").unwrap();
        tree.rescan_current();

        let names: Vec<_> = tree.visible_nodes().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["sub", "a.mp4", "c.avi"]);
    }

    #[test]
    fn test_navigate_boundaries() {
        // 10 items, 4 columns:
        //  0 1 2 3
        //  4 5 6 7
        //  8 9
        let (_temp, tree) = grid(10);

        tree.navigate(Direction::Up, 4);
        assert_eq!(tree.selected_index(), Some(0));
        tree.navigate(Direction::Left, 4);
        assert_eq!(tree.selected_index(), Some(0));

        tree.navigate(Direction::Down, 4);
        tree.navigate(Direction::Down, 4);
        assert_eq!(tree.selected_index(), Some(8));
        tree.navigate(Direction::Down, 4);
        assert_eq!(tree.selected_index(), Some(8));

        tree.navigate(Direction::Right, 4);
        assert_eq!(tree.selected_index(), Some(9));
        tree.navigate(Direction::Right, 4);
        assert_eq!(tree.selected_index(), Some(9));

        tree.navigate(Direction::Up, 4);
        assert_eq!(tree.selected_index(), Some(5));

        // Down from 7 would land on 11, past the end
        assert!(tree.select(7));
        tree.navigate(Direction::Down, 4);
        assert_eq!(tree.selected_index(), Some(7));
    }

    #[test]
    fn test_navigate_zero_columns_acts_as_one() {
        let (_temp, tree) = grid(3);
        tree.navigate(Direction::Down, 0);
        assert_eq!(tree.selected_index(), Some(1));
    }

    #[test]
    fn test_navigate_huge_columns_stays_put() {
        let (_temp, tree) = grid(3);
        tree.navigate(Direction::Right, 1);

        tree.navigate(Direction::Down, usize::MAX);
        assert_eq!(tree.selected_index(), Some(1));
        tree.navigate(Direction::Up, usize::MAX);
        assert_eq!(tree.selected_index(), Some(1));

        assert!(tree.select(2));
        tree.navigate(Direction::Right, usize::MAX);
        assert_eq!(tree.selected_index(), Some(2));
    }

    #[test]
    fn test_select_out_of_range() {
        let (_temp, tree) = grid(3);
        assert!(!tree.select(3));
        assert_eq!(tree.selected_index(), Some(0));
    }

    #[test]
    fn test_visible_nodes_is_a_snapshot() {
        let temp = fixture();
        let tree = loaded(temp.path());
        let before = tree.visible_nodes();

        tree.enter();

        assert_eq!(before.len(), 2);
        assert_eq!(before[0].name, "sub");
        assert_eq!(tree.visible_nodes().len(), 1);
    }

    #[test]
    fn test_breadcrumbs_and_lookup() {
        let temp = fixture();
        let tree = loaded(temp.path());
        let root_name = tree.current_directory().unwrap().name;

        tree.enter();

        assert_eq!(tree.breadcrumbs(), format!("{root_name}/sub"));
        let video = tree.lookup(&tree.root_path().join("sub/b.mkv")).unwrap();
        assert!(video.is_video());
    }

    #[test]
    fn test_shutdown_stops_cache_sweeper() {
        let temp = fixture();
        let tree = loaded(temp.path());
        assert!(tree.shared.cache.is_sweeping());
        tree.shutdown();
        assert!(!tree.shared.cache.is_sweeping());
        // Navigation keeps working without the sweeper
        assert!(matches!(tree.enter(), EnterOutcome::Entered(_)));
    }
}
