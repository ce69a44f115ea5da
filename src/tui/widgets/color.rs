use ratatui::style::Color;

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: black, red, green, yellow, blue, magenta, cyan, white, gray/grey
/// - Extended named colors: darkgray, lightred, lightgreen, lightyellow, lightblue, lightmagenta, lightcyan
/// - Hex format: #RRGGBB or #RGB (short form)
/// Returns Color::White as default for unrecognized colors
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "lightgray" | "lightgrey" => Color::Gray, // LightGray not available, use Gray
        _ => {
            if s.starts_with('#') {
                if let Some(color) = parse_hex_color(&s) {
                    return color;
                }
            }
            Color::White
        }
    }
}

/// Parse hex color format (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');

    // Byte-length checks below assume one byte per digit; non-ASCII input
    // can't be a hex color anyway
    if !hex.is_ascii() {
        return None;
    }

    if hex.len() == 6 {
        // Full format: #RRGGBB
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
    } else if hex.len() == 3 {
        // Short format: #RGB -> #RRGGBB
        let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
        // Expand: 0x0 -> 0x00, 0xF -> 0xFF
        let r = (r << 4) | r;
        let g = (g << 4) | g;
        let b = (b << 4) | b;
        return Some(Color::Rgb(r, g, b));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color(" Grey "), Color::Gray);
        assert_eq!(parse_color("nonsense"), Color::White);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#f00"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#zzz"), Color::White);
    }

    #[test]
    fn test_multibyte_hex_falls_back_to_white() {
        // "é€a" is 6 bytes but 3 chars; must not be byte-sliced as hex
        assert_eq!(parse_color("#é€a"), Color::White);
        assert_eq!(parse_color("#ééé"), Color::White);
    }
}
