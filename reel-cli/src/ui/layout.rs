use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main application layout
pub struct AppLayout {
    pub header: Rect,
    pub detail: Rect,
    pub grid: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(2), // Selected item + poster
                Constraint::Min(5),    // Poster grid
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            detail: chunks[1],
            grid: chunks[2],
            footer: chunks[3],
        }
    }
}

/// Calculate centered rectangle for overlays
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;

    Rect::new(x, y, width, height)
}

/// Keep the tail of `text` so it fits in `max` columns
pub fn truncate_left(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().skip(len - max).collect();
    }
    let tail: String = text.chars().skip(len - (max - 3)).collect();
    format!("...{tail}")
}

/// Keep the head of `text` so it fits in `max` columns
pub fn truncate_right(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 1 {
        return text.chars().take(max).collect();
    }
    let head: String = text.chars().take(max - 1).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_left() {
        assert_eq!(truncate_left("/media/movies", 20), "/media/movies");
        assert_eq!(truncate_left("/media/movies/Alien", 10), "...s/Alien");
        assert_eq!(truncate_left("abcdef", 2), "ef");
    }

    #[test]
    fn test_truncate_right() {
        assert_eq!(truncate_right("Alien.mkv", 20), "Alien.mkv");
        assert_eq!(truncate_right("The Long Title.mkv", 8), "The Lon…");
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 40, 20);
        let rect = centered_rect(100, 100, area);
        assert_eq!(rect, Rect::new(2, 2, 36, 16));
    }
}
