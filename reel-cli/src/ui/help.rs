use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::centered_rect;
use super::theme::Theme;

/// Help overlay widget
pub struct HelpView<'a> {
    theme: &'a Theme,
}

impl<'a> HelpView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(46, 20, area);

        Clear.render(help_area, buf);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.blue))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(help_area);
        block.render(help_area, buf);

        let key_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg);
        let section_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);

        let help_items = [
            ("", "Grid", true),
            ("↑ k", "Row up", false),
            ("↓ j", "Row down", false),
            ("← h", "Previous item", false),
            ("→ l", "Next item", false),
            ("Home g", "First item", false),
            ("End G", "Last item", false),
            ("", "", false),
            ("", "Library", true),
            ("Enter", "Open directory / select file", false),
            ("Bksp Esc", "Parent directory", false),
            ("r", "Rescan current directory", false),
            ("", "", false),
            ("", "Other", true),
            ("?", "Toggle this help", false),
            ("q Ctrl+C", "Quit", false),
        ];

        for (i, (key, desc, is_section)) in help_items.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }

            let y = inner.y + i as u16;

            if *is_section {
                buf.set_string(inner.x, y, *desc, section_style);
            } else if !key.is_empty() {
                buf.set_string(inner.x, y, format!("{:10}", key), key_style);
                buf.set_string(inner.x + 10, y, *desc, desc_style);
            }
        }
    }
}
