use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::tui::widgets::color::parse_color;

/// Horizontal gap between neighboring chips, in cells
const CHIP_GAP: u16 = 1;

/// Screen-space footprint of one rendered chip.
///
/// Identity is the tag's string value; positions are only valid for the
/// snapshot of tags they were computed from, so callers must re-layout from
/// the latest state before hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipRect {
    pub value: String,
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl ChipRect {
    /// Column of the `✕` remove affordance inside this chip
    pub fn remove_cell(&self) -> u16 {
        self.x + self.width.saturating_sub(2)
    }
}

/// Cell width of a chip for a given tag: ` label ✕ `
fn chip_width(value: &str) -> u16 {
    u16::try_from(value.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

/// Lay chips out left-to-right inside `area`, wrapping to the next row when
/// a chip would not fit. Chips below the area's bottom edge are dropped.
pub fn layout_chips(tags: &[String], area: Rect) -> Vec<ChipRect> {
    let mut chips = Vec::new();
    let mut x = area.x;
    let mut y = area.y;

    for tag in tags {
        let width = chip_width(tag).min(area.width);
        if x + width > area.x + area.width && x > area.x {
            x = area.x;
            y += 1;
        }
        if y >= area.y + area.height {
            break;
        }
        chips.push(ChipRect {
            value: tag.clone(),
            x,
            y,
            width,
        });
        x += width + CHIP_GAP;
    }

    chips
}

/// Map a mouse position to the chip whose remove affordance was hit.
/// Clicks on the chip label (or anywhere else) resolve to None; only the
/// `✕` cell acts as the remove affordance.
pub fn hit_test<'a>(chips: &'a [ChipRect], column: u16, row: u16) -> Option<&'a str> {
    chips
        .iter()
        .find(|chip| row == chip.y && column == chip.remove_cell())
        .map(|chip| chip.value.as_str())
}

/// Render the chips for the current tags and return their layout so the
/// caller can hit test later clicks against it.
pub fn render_chips(f: &mut Frame, area: Rect, tags: &[String], theme: &Theme) -> Vec<ChipRect> {
    let chips = layout_chips(tags, area);
    let chip_style = Style::default()
        .fg(parse_color(&theme.chip_fg))
        .bg(parse_color(&theme.chip_bg));

    let mut lines: Vec<Line> = Vec::new();
    for row in area.y..area.y + area.height {
        let mut spans: Vec<Span> = Vec::new();
        let mut filled = area.x;
        for chip in chips.iter().filter(|c| c.y == row) {
            if chip.x > filled {
                spans.push(Span::raw(" ".repeat((chip.x - filled) as usize)));
            }
            let label: String = chip
                .value
                .chars()
                .take(chip.width.saturating_sub(4) as usize)
                .collect();
            spans.push(Span::styled(format!(" {} ✕ ", label), chip_style));
            filled = chip.x + chip.width;
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
    chips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_layout_single_row() {
        let area = Rect::new(2, 1, 30, 3);
        let chips = layout_chips(&tags(&["ab", "cde"]), area);
        // " ab ✕ " is 6 wide, " cde ✕ " is 7 wide, 1 cell gap
        assert_eq!(chips.len(), 2);
        assert_eq!((chips[0].x, chips[0].y, chips[0].width), (2, 1, 6));
        assert_eq!((chips[1].x, chips[1].y, chips[1].width), (9, 1, 7));
    }

    #[test]
    fn test_layout_wraps_to_next_row() {
        let area = Rect::new(0, 0, 10, 3);
        let chips = layout_chips(&tags(&["abc", "def"]), area);
        // Each chip is 7 wide; the second cannot fit beside the first
        assert_eq!(chips[0].y, 0);
        assert_eq!(chips[1].y, 1);
        assert_eq!(chips[1].x, 0);
    }

    #[test]
    fn test_layout_clips_below_area() {
        let area = Rect::new(0, 0, 7, 1);
        let chips = layout_chips(&tags(&["abc", "def"]), area);
        assert_eq!(chips.len(), 1);
    }

    #[test]
    fn test_oversize_chip_is_clamped() {
        let area = Rect::new(0, 0, 8, 2);
        let chips = layout_chips(&tags(&["muchtoolong"]), area);
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].width, 8);
    }

    #[test]
    fn test_huge_tag_width_saturates() {
        // A tag longer than u16::MAX chars must clamp, not wrap around to a
        // tiny width
        let area = Rect::new(0, 0, 10, 2);
        let chips = layout_chips(&[ "a".repeat(70_000) ], area);
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].width, 10);
    }

    #[test]
    fn test_hit_test_remove_cell_only() {
        let area = Rect::new(0, 0, 30, 2);
        let chips = layout_chips(&tags(&["ab", "cd"]), area);
        // First chip " ab ✕ ": remove cell at x=4
        assert_eq!(hit_test(&chips, 4, 0), Some("ab"));
        // Label cells are not the remove affordance
        assert_eq!(hit_test(&chips, 1, 0), None);
        // Second chip starts at x=7, remove cell at x=11
        assert_eq!(hit_test(&chips, 11, 0), Some("cd"));
        // Outside any chip
        assert_eq!(hit_test(&chips, 20, 0), None);
        assert_eq!(hit_test(&chips, 4, 1), None);
    }

    #[test]
    fn test_hit_test_empty() {
        assert_eq!(hit_test(&[], 0, 0), None);
    }
}
