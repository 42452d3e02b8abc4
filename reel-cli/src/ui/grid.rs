use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use reel_core::MediaNode;

use super::layout::truncate_right;
use super::theme::Theme;

/// Terminal rows taken by one grid cell, borders included
pub const CELL_HEIGHT: u16 = 4;

/// Grid rows that fit in `height`
pub fn rows_that_fit(height: u16) -> usize {
    (height / CELL_HEIGHT).max(1) as usize
}

/// Area of the cell at `row`/`col` of the on-screen grid
pub fn cell_area(area: Rect, columns: usize, row: usize, col: usize) -> Rect {
    let columns = u16::try_from(columns).unwrap_or(u16::MAX).max(1);
    let width = area.width / columns;
    Rect::new(
        area.x + col as u16 * width,
        area.y + row as u16 * CELL_HEIGHT,
        width,
        CELL_HEIGHT,
    )
}

/// Poster grid of the current directory
pub struct GridView<'a> {
    nodes: &'a [MediaNode],
    selected: Option<usize>,
    columns: usize,
    scroll_row: usize,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> GridView<'a> {
    pub fn new(
        nodes: &'a [MediaNode],
        selected: Option<usize>,
        columns: usize,
        scroll_row: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            nodes,
            selected,
            columns: columns.max(1),
            scroll_row,
            loading: false,
            theme,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn render_cell(&self, node: &MediaNode, selected: bool, area: Rect, buf: &mut Buffer) {
        let accent = self.theme.kind_color(node.kind);
        let (border_style, name_style) = if selected {
            (
                Style::default()
                    .fg(self.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(self.theme.selection_fg)
                    .bg(self.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(self.theme.border),
                Style::default().fg(self.theme.fg),
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height < 1 {
            return;
        }

        buf.set_string(inner.x, inner.y, node.kind.icon(), Style::default().fg(accent));
        let name = truncate_right(&node.name, inner.width.saturating_sub(3) as usize);
        buf.set_string(inner.x + 3, inner.y, name, name_style);

        if inner.height < 2 {
            return;
        }
        let (marker, style) = match (&node.poster, node.is_directory() && node.has_children()) {
            (Some(_), _) => ("▣ poster".to_string(), Style::default().fg(self.theme.green)),
            (None, true) => (
                format!("{} items", node.children.len()),
                Style::default().fg(self.theme.fg_dim),
            ),
            (None, false) => ("□".to_string(), Style::default().fg(self.theme.fg_muted)),
        };
        buf.set_string(inner.x, inner.y + 1, &marker, style);
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < CELL_HEIGHT || area.width < 8 {
            return;
        }

        if self.nodes.is_empty() {
            let message = if self.loading {
                "Scanning..."
            } else {
                "Empty directory"
            };
            buf.set_string(
                area.x + 2,
                area.y + 1,
                message,
                Style::default().fg(self.theme.fg_muted),
            );
            return;
        }

        let rows = rows_that_fit(area.height);
        let first = self.scroll_row * self.columns;
        let on_screen = self.nodes.iter().enumerate().skip(first).take(rows * self.columns);

        for (index, node) in on_screen {
            let offset = index - first;
            let cell = cell_area(area, self.columns, offset / self.columns, offset % self.columns);
            self.render_cell(node, self.selected == Some(index), cell, buf);
        }
    }
}
