//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Rect,
    pub filter: Rect,
    pub body: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the main screen layout
///
/// The filter bar is only present on the records view; pass
/// `show_filter = false` to give its rows to the body.
pub fn calculate_main_layout(area: Rect, show_filter: bool) -> MainLayout {
    let filter_height = if show_filter { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(filter_height),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        tabs: chunks[0],
        filter: chunks[1],
        body: chunks[2],
        status: chunks[3],
        help: chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));

        let oversized = centered_popup(area, 200, 80);
        assert_eq!(oversized.width, 100);
        assert_eq!(oversized.height, 40);
    }

    #[test]
    fn test_filter_row_collapses_on_dashboard() {
        let area = Rect::new(0, 0, 80, 24);
        let with_filter = calculate_main_layout(area, true);
        assert_eq!(with_filter.filter.height, 3);

        let without = calculate_main_layout(area, false);
        assert_eq!(without.filter.height, 0);
        assert_eq!(without.body.height, with_filter.body.height + 3);
    }
}
