mod app;
mod config;
mod list;
mod logging;
mod tui;
mod ui;

use std::io::{self, Write, stdout};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};
use reel_core::{Direction, IndexConfig, LoadMessage, LoadTask, MediaTree};
use tracing::{debug, info, warn};

use app::{Action, AppMode, AppState};
use config::{AppConfig, CacheSection, FilterSection, UiSection};
use logging::LogTarget;
use tui::{AppEvent, EventHandler, handle_key};
use ui::{AppLayout, DetailBar, Footer, GridView, Header, HelpView, ProgressView, Theme};

/// REEL - Terminal poster-grid browser for media libraries
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(about = "Browse a media library as a grid, with poster images matched to each title")]
#[command(version)]
struct Args {
    /// Library root (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Grid width in cells
    #[arg(short, long)]
    columns: Option<usize>,

    /// Include names starting with a dot
    #[arg(long)]
    show_hidden: bool,

    /// File extension to leave out (repeatable; replaces the configured list)
    #[arg(long = "skip-ext", value_name = "EXT")]
    skip_ext: Vec<String>,

    /// Maximum entries kept per directory
    #[arg(long)]
    max_children: Option<usize>,

    /// Seconds a directory listing stays cached
    #[arg(long, value_name = "SECS")]
    cache_ttl: Option<u64>,

    /// Extra config file, applied over the standard locations
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the indexed library and exit
    #[arg(short, long)]
    list: bool,

    /// Log file for interactive mode
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Flags expressed as the highest-priority config layer
    fn overrides(&self) -> AppConfig {
        AppConfig {
            filter: FilterSection {
                skip_hidden: self.show_hidden.then_some(false),
                skip_extensions: (!self.skip_ext.is_empty()).then(|| self.skip_ext.clone()),
                max_children: self.max_children,
            },
            cache: CacheSection {
                ttl_secs: self.cache_ttl,
                ..Default::default()
            },
            ui: UiSection {
                columns: self.columns,
            },
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref(), &args.overrides());

    let log_target = if args.list {
        LogTarget::Stderr
    } else {
        match args.log_file.clone().or_else(logging::default_log_file) {
            Some(path) => LogTarget::File(path),
            None => LogTarget::Stderr,
        }
    };
    logging::init(&log_target)?;

    let index_config = config.index_config();
    debug!(
        skip_extensions = ?index_config.filter.skipped_extensions().collect::<Vec<_>>(),
        max_children = index_config.filter.max_children,
        "Index filter"
    );
    if args.list {
        return run_list(args.path, index_config);
    }

    let (tree, task) = MediaTree::load(args.path, index_config)?;
    info!(root = %tree.root_path().display(), "Opened library");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, tree, &task, config.columns());

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run_list(path: PathBuf, config: IndexConfig) -> Result<()> {
    let (tree, task) = MediaTree::load(path, config)?;

    for msg in task.receiver().iter() {
        if let LoadMessage::ScanError { path, message } = msg {
            warn!(path = %path.display(), %message, "Directory could not be read");
        }
    }
    let stats = task.wait()?;

    let mut out = io::stdout().lock();
    list::write_listing(&tree, &mut out)?;
    list::write_summary(&stats, &mut out)?;
    out.flush()?;

    tree.shutdown();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tree: MediaTree,
    task: &LoadTask,
    columns: usize,
) -> Result<()> {
    let theme = Theme::default();
    let mut state = AppState::new(tree, columns);
    let event_handler = EventHandler::new(50); // 50ms tick rate

    loop {
        while let Some(msg) = task.try_recv() {
            state.handle_load_message(msg);
        }
        state.sync();

        terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::new(area);

            // Background
            frame
                .buffer_mut()
                .set_style(area, Style::default().bg(theme.bg));

            // Rows on screen drive scrolling
            state.visible_rows = ui::rows_that_fit(layout.grid.height);
            state.ensure_selection_visible();

            Header::new(&state, &theme).render(layout.header, frame.buffer_mut());
            DetailBar::new(state.selected_node(), state.status.as_ref(), &theme)
                .render(layout.detail, frame.buffer_mut());

            match state.mode {
                AppMode::Loading => {
                    ProgressView::new(&state.stats, state.spinner_frame, &theme)
                        .render(layout.grid, frame.buffer_mut());
                }
                AppMode::Browsing | AppMode::Help => {
                    GridView::new(
                        &state.visible,
                        state.selected_index,
                        state.columns,
                        state.scroll_row,
                        &theme,
                    )
                    .loading(state.is_loading())
                    .render(layout.grid, frame.buffer_mut());
                }
            }

            if state.mode == AppMode::Help {
                HelpView::new(&theme).render(area, frame.buffer_mut());
            }

            Footer::new(state.mode, state.columns, &theme).render(layout.footer, frame.buffer_mut());
        })?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode);
                handle_action(&mut state, action);
            }
            AppEvent::Resize(_, _) => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => state.tick(),
        }

        if state.should_quit {
            break;
        }
    }

    state.tree.shutdown();
    Ok(())
}

fn handle_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.move_selection(Direction::Up),
        Action::MoveDown => state.move_selection(Direction::Down),
        Action::MoveLeft => state.move_selection(Direction::Left),
        Action::MoveRight => state.move_selection(Direction::Right),
        Action::GoToFirst => state.go_to_first(),
        Action::GoToLast => state.go_to_last(),
        Action::Open => state.open_selected(),
        Action::GoUp => state.go_up(),
        Action::Rescan => state.rescan(),
        Action::ShowHelp => state.show_help(),
        Action::HideHelp => state.hide_help(),
        Action::Quit => state.quit(),
        Action::Tick => {}
    }
}
