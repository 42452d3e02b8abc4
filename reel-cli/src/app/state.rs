use std::path::Path;
use std::time::{Duration, Instant};

use reel_core::{Direction, EnterOutcome, IndexStats, LoadMessage, MediaNode, MediaTree};

/// How long a status message stays in the detail bar
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Warm-up running and nothing to show yet
    Loading,
    /// Browsing the poster grid
    Browsing,
    /// Showing help overlay
    Help,
}

/// Transient message shown in the detail bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl StatusMessage {
    fn new(text: String, is_error: bool) -> Self {
        Self {
            text,
            is_error,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() >= STATUS_TTL
    }
}

/// First grid row to draw so that `selected` stays on screen
pub fn scroll_to_selection(
    selected: usize,
    columns: usize,
    visible_rows: usize,
    scroll_row: usize,
) -> usize {
    let row = selected / columns.max(1);
    let rows = visible_rows.max(1);
    if row < scroll_row {
        row
    } else if row >= scroll_row + rows {
        row + 1 - rows
    } else {
        scroll_row
    }
}

/// Application state
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// The index being browsed
    pub tree: MediaTree,
    /// Grid width in cells
    pub columns: usize,
    /// Latest counts from the warm-up
    pub stats: IndexStats,
    /// Warm-up duration, once it finished
    pub load_time: Option<Duration>,
    started_at: Instant,
    /// Children of the current directory, refreshed every frame
    pub visible: Vec<MediaNode>,
    pub selected_index: Option<usize>,
    /// First grid row on screen
    pub scroll_row: usize,
    /// Grid rows that fit on screen (set by UI)
    pub visible_rows: usize,
    /// Whether app should quit
    pub should_quit: bool,
    /// Spinner frame for animation
    pub spinner_frame: usize,
    pub status: Option<StatusMessage>,
    /// Mode to restore when help closes
    mode_before_help: AppMode,
}

impl AppState {
    pub fn new(tree: MediaTree, columns: usize) -> Self {
        let mut state = Self {
            mode: AppMode::Loading,
            tree,
            columns: columns.max(1),
            stats: IndexStats::default(),
            load_time: None,
            started_at: Instant::now(),
            visible: Vec::new(),
            selected_index: None,
            scroll_row: 0,
            visible_rows: 3,
            should_quit: false,
            spinner_frame: 0,
            status: None,
            mode_before_help: AppMode::Loading,
        };
        state.sync();
        state
    }

    /// Apply a warm-up message
    pub fn handle_load_message(&mut self, msg: LoadMessage) {
        match msg {
            LoadMessage::Progress(stats) => self.stats = stats,
            LoadMessage::ScanError { path, message } => {
                self.set_error(format!("Cannot read {}: {}", path.display(), message));
            }
            LoadMessage::Completed(stats) => {
                self.stats = stats;
                self.load_time = Some(self.started_at.elapsed());
                self.finish_loading();
            }
        }
    }

    /// Pull the visible snapshot and selection from the tree
    pub fn sync(&mut self) {
        self.visible = self.tree.visible_nodes();
        self.selected_index = self.tree.selected_index();
        if !self.visible.is_empty() || !self.tree.is_loading() {
            self.finish_loading();
        }
        self.ensure_selection_visible();
    }

    fn finish_loading(&mut self) {
        match self.mode {
            AppMode::Loading => self.mode = AppMode::Browsing,
            AppMode::Help => self.mode_before_help = AppMode::Browsing,
            AppMode::Browsing => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.tree.is_loading()
    }

    /// Keep the selected cell inside the rows on screen
    pub fn ensure_selection_visible(&mut self) {
        match self.selected_index {
            Some(selected) => {
                self.scroll_row =
                    scroll_to_selection(selected, self.columns, self.visible_rows, self.scroll_row);
            }
            None => self.scroll_row = 0,
        }
    }

    pub fn selected_node(&self) -> Option<&MediaNode> {
        self.selected_index.and_then(|i| self.visible.get(i))
    }

    /// Advance spinner animation and drop stale status messages
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
        if self.status.as_ref().is_some_and(StatusMessage::expired) {
            self.status = None;
        }
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.tree.navigate(direction, self.columns);
        self.sync();
    }

    pub fn go_to_first(&mut self) {
        self.tree.select(0);
        self.sync();
    }

    pub fn go_to_last(&mut self) {
        if let Some(last) = self.visible.len().checked_sub(1) {
            self.tree.select(last);
        }
        self.sync();
    }

    /// Open the selected directory, or report the selected file
    pub fn open_selected(&mut self) {
        match self.tree.enter() {
            EnterOutcome::Nothing => {}
            EnterOutcome::Activated(path) => {
                self.set_status(format!("Selected {}", display_name(&path)));
            }
            EnterOutcome::Entered(_) => {
                self.scroll_row = 0;
                self.status = None;
            }
        }
        self.sync();
    }

    pub fn go_up(&mut self) {
        if self.tree.go_up() {
            self.scroll_row = 0;
        }
        self.sync();
    }

    /// Re-read the current directory, ignoring the cached listing
    pub fn rescan(&mut self) {
        self.tree.rescan_current();
        self.sync();
        self.set_status(format!("Rescanned {}", self.tree.breadcrumbs()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        if self.mode != AppMode::Help {
            self.mode_before_help = self.mode;
            self.mode = AppMode::Help;
        }
    }

    /// Hide help overlay
    pub fn hide_help(&mut self) {
        if self.mode == AppMode::Help {
            self.mode = self.mode_before_help;
        }
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage::new(text, false));
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage::new(text, true));
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
