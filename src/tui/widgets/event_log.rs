use std::collections::VecDeque;

use crate::Config;
use crate::tui::widgets::color::parse_color;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, List, ListItem};

/// Render the recent-events pane: the newest events that fit, oldest first
pub fn render_event_log(f: &mut Frame, area: Rect, feed: &VecDeque<String>, config: &Config) {
    let fg_color = parse_color(&config.theme.fg);

    let block = Block::default().borders(Borders::ALL).title("Events");
    let inner_height = area.height.saturating_sub(2) as usize;

    let visible = feed.len().saturating_sub(inner_height);
    let items: Vec<ListItem> = feed
        .iter()
        .skip(visible)
        .map(|line| ListItem::new(line.as_str()))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(fg_color));
    f.render_widget(list, area);
}
