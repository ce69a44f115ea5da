use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::{App, Layout};
use crate::tui::widgets::{
    chips::render_chips,
    color::parse_color,
    event_log::render_event_log,
    status_bar::render_status_bar,
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let fg_color = parse_color(&app.config.theme.fg);
    let bg_color = parse_color(&app.config.theme.bg);

    // Render outer border with the app name centered in the top border
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("chipline")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    // Chips pane; the title shows the count against the configured cap
    let count = app.input.collection.len();
    let chips_title = match app.config.max_tags {
        Some(max) => format!("Tags ({}/{})", count, max),
        None => format!("Tags ({})", count),
    };
    let chips_block = Block::default()
        .borders(Borders::ALL)
        .title(chips_title)
        .style(Style::default().fg(fg_color));
    let chips_inner = chips_block.inner(layout.chips_area);
    f.render_widget(chips_block, layout.chips_area);

    // Keep the layout for mouse hit testing against the current snapshot
    let tags = app.input.collection.tags();
    app.chip_layout = render_chips(f, chips_inner, &tags, &app.config.theme);

    // Input box with a visible caret
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title("Input")
        .style(Style::default().fg(fg_color));
    let input_inner = input_block.inner(layout.input_area);
    f.render_widget(input_block, layout.input_area);

    // Scroll the buffer horizontally so the caret never walks off-screen
    let scroll = input_scroll(app.input.cursor(), input_inner.width);
    f.render_widget(
        Paragraph::new(app.input.buffer()).scroll((0, scroll)),
        input_inner,
    );

    let caret_col = u16::try_from(app.input.cursor())
        .unwrap_or(u16::MAX)
        .saturating_sub(scroll);
    f.set_cursor_position((input_inner.x.saturating_add(caret_col), input_inner.y));

    // Event feed fed by the collection's listeners
    render_event_log(f, layout.events_area, &app.event_feed.borrow(), &app.config);

    // Status bar
    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_ref(),
        &key_hints,
        &app.config,
    );
}

/// Columns to scroll the input paragraph left so the caret stays visible
/// inside a box `width` cells wide
fn input_scroll(cursor: usize, width: u16) -> u16 {
    u16::try_from(cursor)
        .unwrap_or(u16::MAX)
        .saturating_sub(width.saturating_sub(1))
}

fn get_key_hints(app: &App) -> Vec<String> {
    vec![
        format!("{}: Add", app.config.boundary_keys.join("/")),
        format!("{} at start: Pop", app.config.delete_key),
        format!("{}: Clear", app.config.key_bindings.clear_all),
        "Click ✕: Remove".to_string(),
        format!("{}: Quit", app.config.key_bindings.quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_scroll_keeps_caret_visible() {
        // Buffer shorter than the box: no scroll
        assert_eq!(input_scroll(0, 10), 0);
        assert_eq!(input_scroll(9, 10), 0);
        // Caret one past the last visible column scrolls by one, and so on
        assert_eq!(input_scroll(10, 10), 1);
        assert_eq!(input_scroll(25, 10), 16);
        // Degenerate widths don't underflow
        assert_eq!(input_scroll(5, 0), 5);
    }
}
