use crate::Config;
use crate::tui::widgets::color::parse_color;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);

    let (mut content, style) = if let Some(msg) = message {
        // Status messages get the chip colors for visibility
        let msg_fg = parse_color(&config.theme.chip_fg);
        let msg_bg = parse_color(&config.theme.chip_bg);
        (
            msg.clone(),
            Style::default()
                .fg(msg_fg)
                .bg(msg_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        // Key hints use normal styling with bullet separators, fitting as
        // many hints as the width allows
        let max_width = area.width as usize;
        let separator = " • ";
        let separator_len = separator.chars().count();

        let mut hints_text = String::new();
        for (i, hint) in key_hints.iter().enumerate() {
            let hint_len = hint.chars().count();
            let current_len = hints_text.chars().count();

            let would_be_len = if i == 0 {
                hint_len
            } else {
                current_len + separator_len + hint_len
            };

            if would_be_len > max_width {
                if !hints_text.is_empty() && current_len + 3 <= max_width {
                    hints_text.push_str("...");
                }
                break;
            }

            if i > 0 {
                hints_text.push_str(separator);
            }
            hints_text.push_str(hint);
        }

        (hints_text, Style::default().fg(fg_color).bg(bg_color))
    };

    // Truncate long status messages to the available width
    if message.is_some() {
        let max_width = area.width as usize;
        if content.chars().count() > max_width {
            content = content
                .chars()
                .take(max_width.saturating_sub(3))
                .collect::<String>()
                + "...";
        }
    }

    // Render status bar without Block wrapper - simple 1-line display
    let paragraph = Paragraph::new(content).style(style);
    f.render_widget(paragraph, area);
}
