use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use reel_core::{format_count, format_elapsed};

use crate::app::AppState;

use super::layout::truncate_left;
use super::progress::progress_indicator;
use super::theme::Theme;

/// Header widget showing title, breadcrumbs, and load status
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn status(&self) -> String {
        let stats = &self.state.stats;
        if self.state.is_loading() {
            return progress_indicator(stats, self.state.spinner_frame);
        }

        let mut status = format!(
            "{} dirs, {} files",
            format_count(stats.dirs),
            format_count(stats.files)
        );
        if let Some(elapsed) = self.state.load_time {
            status.push_str(&format!(" in {}", format_elapsed(elapsed)));
        }
        if stats.errors > 0 {
            status.push_str(&format!(", {} errors", format_count(stats.errors)));
        }
        status
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        let title = "REEL";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);

        buf.set_string(
            area.x + 6,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        let status = self.status();
        let status_width = status.chars().count() as u16;

        let breadcrumbs = self.state.tree.breadcrumbs();
        let max_path_len = area.width.saturating_sub(status_width + 12) as usize;
        buf.set_string(
            area.x + 8,
            area.y,
            truncate_left(&breadcrumbs, max_path_len),
            Style::default().fg(self.theme.fg),
        );

        let status_style = if self.state.is_loading() {
            Style::default().fg(self.theme.yellow)
        } else {
            Style::default().fg(self.theme.fg_dim)
        };
        let status_x = (area.x + area.width).saturating_sub(status_width + 2);
        buf.set_string(status_x, area.y, &status, status_style);
    }
}
