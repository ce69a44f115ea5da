use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for chipline
/// If profile is Dev, uses "chipline-dev" instead of "chipline"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "chipline-dev",
        Profile::Prod => "chipline",
    };
    // Use "com" as qualifier for better cross-platform compatibility
    ProjectDirs::from("com", "chipline", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Split a comma-separated string into trimmed, non-empty values
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

impl ParsedKeyBinding {
    /// Check whether a key event matches this binding
    pub fn matches(&self, key_event: crossterm::event::KeyEvent) -> bool {
        let has_ctrl = key_event
            .modifiers
            .contains(crossterm::event::KeyModifiers::CONTROL);
        self.requires_ctrl == has_ctrl && self.key_code == key_event.code
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports: single keys ("q", "j"), special keys ("Enter", "Esc"),
/// and modifiers ("Ctrl+u")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    // Handle modifier keys (Ctrl+)
    if key_str.starts_with("Ctrl+") {
        let key_part = key_str
            .strip_prefix("Ctrl+")
            .expect("strip_prefix should succeed after starts_with check");
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    // Handle regular keys (no modifiers)
    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
pub fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    // Handle special keys
    match key_str {
        "Enter" => Ok(crossterm::event::KeyCode::Enter),
        "Esc" | "Escape" => Ok(crossterm::event::KeyCode::Esc),
        "Backspace" => Ok(crossterm::event::KeyCode::Backspace),
        "Tab" => Ok(crossterm::event::KeyCode::Tab),
        "Space" | " " => Ok(crossterm::event::KeyCode::Char(' ')),
        "Comma" => Ok(crossterm::event::KeyCode::Char(',')),
        "Left" => Ok(crossterm::event::KeyCode::Left),
        "Right" => Ok(crossterm::event::KeyCode::Right),
        "Up" => Ok(crossterm::event::KeyCode::Up),
        "Down" => Ok(crossterm::event::KeyCode::Down),
        "Home" => Ok(crossterm::event::KeyCode::Home),
        "End" => Ok(crossterm::event::KeyCode::End),
        "Delete" => Ok(crossterm::event::KeyCode::Delete),
        "Insert" => Ok(crossterm::event::KeyCode::Insert),
        _ => {
            // Try to parse as a single character
            if key_str.chars().count() == 1 {
                match key_str.chars().next() {
                    Some(c) => Ok(crossterm::event::KeyCode::Char(c)),
                    None => Err(
                        "Empty key string after length check (this should not happen)".to_string(),
                    ),
                }
            } else {
                Err(format!("Unknown key binding: {}", key_str))
            }
        }
    }
}
