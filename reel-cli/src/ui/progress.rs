use reel_core::{IndexStats, format_count};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};

use super::layout::truncate_left;
use super::theme::Theme;

/// Braille spinner characters
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Progress widget shown until the root listing arrives
pub struct ProgressView<'a> {
    stats: &'a IndexStats,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(stats: &'a IndexStats, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            stats,
            spinner_frame,
            theme,
        }
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let spinner_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(inner.x, inner.y, spinner.to_string(), spinner_style);

        buf.set_string(
            inner.x + 2,
            inner.y,
            "Building media library...",
            Style::default().fg(self.theme.fg),
        );

        if let Some(path) = &self.stats.current_path {
            let display_path =
                truncate_left(&path.to_string_lossy(), inner.width.saturating_sub(2) as usize);
            buf.set_string(
                inner.x,
                inner.y + 1,
                &display_path,
                Style::default().fg(self.theme.fg_dim),
            );
        }

        let counts = format!(
            "Found {} directories and {} files  {} errors",
            format_count(self.stats.dirs),
            format_count(self.stats.files),
            format_count(self.stats.errors),
        );
        buf.set_string(
            inner.x,
            inner.y + 2,
            &counts,
            Style::default().fg(self.theme.fg_muted),
        );
    }
}

/// Compact progress indicator for header
pub fn progress_indicator(stats: &IndexStats, spinner_frame: usize) -> String {
    let spinner = SPINNER[spinner_frame % SPINNER.len()];
    format!(
        "{} {} dirs, {} files",
        spinner,
        format_count(stats.dirs),
        format_count(stats.files)
    )
}
