use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppMode;

use super::theme::Theme;

/// Footer widget showing keyboard hints
pub struct Footer<'a> {
    mode: AppMode,
    columns: usize,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(mode: AppMode, columns: usize, theme: &'a Theme) -> Self {
        Self {
            mode,
            columns,
            theme,
        }
    }
}

fn hints(mode: AppMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        AppMode::Loading => &[("?", "Help"), ("q", "Quit")],
        AppMode::Browsing => &[
            ("←↑↓→", "Navigate"),
            ("Enter", "Open"),
            ("Bksp", "Up"),
            ("r", "Rescan"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        AppMode::Help => &[("Esc", "Close help"), ("Ctrl+C", "Quit")],
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let hints = hints(self.mode);
        let right_edge = area.x + area.width;
        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.chars().count() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= right_edge.saturating_sub(5) {
                break;
            }
        }

        let grid_label = format!("{} cols", self.columns);
        let label_x = right_edge.saturating_sub(grid_label.len() as u16 + 1);
        if label_x > x + 2 {
            buf.set_string(label_x, area.y, &grid_label, Style::default().fg(self.theme.fg_muted));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_per_mode() {
        assert!(hints(AppMode::Browsing).iter().any(|(k, _)| *k == "Enter"));
        assert!(!hints(AppMode::Loading).iter().any(|(k, _)| *k == "Enter"));
        assert_eq!(hints(AppMode::Help)[0].0, "Esc");
    }
}
