use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use reel_core::MediaNode;

use crate::app::StatusMessage;

use super::layout::truncate_left;
use super::theme::Theme;

/// Two-line bar with the selected path and its poster, or a status message
pub struct DetailBar<'a> {
    selected: Option<&'a MediaNode>,
    status: Option<&'a StatusMessage>,
    theme: &'a Theme,
}

impl<'a> DetailBar<'a> {
    pub fn new(
        selected: Option<&'a MediaNode>,
        status: Option<&'a StatusMessage>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            selected,
            status,
            theme,
        }
    }
}

impl Widget for DetailBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 1 {
            return;
        }
        let width = area.width.saturating_sub(2) as usize;

        if let Some(node) = self.selected {
            let path = node.path.to_string_lossy();
            buf.set_string(
                area.x + 1,
                area.y,
                truncate_left(&path, width),
                Style::default().fg(self.theme.fg),
            );
        }

        if area.height < 2 {
            return;
        }

        let (line, style) = match (self.status, self.selected) {
            (Some(status), _) => {
                let color = if status.is_error {
                    self.theme.red
                } else {
                    self.theme.green
                };
                (status.text.clone(), Style::default().fg(color))
            }
            (None, Some(node)) => match node.poster_path() {
                Some(poster) => (
                    format!("Poster: {}", poster.to_string_lossy()),
                    Style::default().fg(self.theme.fg_dim),
                ),
                None => (
                    "No poster".to_string(),
                    Style::default().fg(self.theme.fg_muted),
                ),
            },
            (None, None) => return,
        };
        buf.set_string(area.x + 1, area.y + 1, truncate_left(&line, width), style);
    }
}
