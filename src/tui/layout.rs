use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub chips_area: Rect,
    pub input_area: Rect,
    pub events_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: 36 columns fits a few chips plus the bordered input box
    /// Height: 13 lines (chips 3 + input 3 + events 6 + status 1)
    pub const MIN_WIDTH: u16 = 36;
    pub const MIN_HEIGHT: u16 = 13;

    pub fn calculate(size: Rect) -> Self {
        // Ensure minimum terminal size (accounting for outer border)
        let min_width_with_border = Self::MIN_WIDTH + 2; // +2 for left/right borders
        let min_height_with_border = Self::MIN_HEIGHT + 2; // +2 for top/bottom borders
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        // Calculate inner area (accounting for outer border: 1 char on each side)
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Split vertically: chips (grows), input (3 lines for borders + content),
        // events feed (6 lines), status (1 line)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Chips
                Constraint::Length(3), // Input (needs borders + content)
                Constraint::Length(6), // Event feed
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            chips_area: vertical[0],
            input_area: vertical[1],
            events_area: vertical[2],
            status_area: vertical[3],
        }
    }
}
