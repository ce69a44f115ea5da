use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;

use crate::tui::App;
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::chips::hit_test;
use crate::utils::parse_key_binding;

/// Guard that ensures terminal state is restored even on panic
/// This is critical for TUI applications - if the terminal is left in raw mode
/// or alternate screen, the user's terminal will be unusable.
struct TerminalGuard {
    /// Track if we successfully entered raw mode
    raw_mode_enabled: bool,
    /// Track if we successfully entered alternate screen + mouse capture
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    /// Initialize terminal state and return a guard
    /// The guard will restore terminal state when dropped (even on panic)
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        // Mouse capture is needed for the chip remove affordance
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    /// After calling this, the guard will do nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore terminal state even if we panic
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen
    // This allows us to show a helpful error message in the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width_with_border = Layout::MIN_WIDTH + 2; // +2 for borders
    let min_height_with_border = Layout::MIN_HEIGHT + 2; // +2 for borders

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    // Setup terminal with guard to ensure restoration on panic
    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        // Check if status message should be auto-cleared
        app.check_status_message_timeout();

        // Render; the draw closure also refreshes the chip layout used for
        // mouse hit testing, so clicks always resolve against current state
        let terminal_size = terminal.size()?;
        use ratatui::layout::Rect;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Handle events - only process Press events to avoid duplicate processing on Windows
        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only process Press events (ignore Release events to prevent double-processing on Windows)
                    if key_event.kind == KeyEventKind::Press {
                        if handle_key_event(&mut app, key_event)? {
                            break; // Quit requested
                        }
                    }
                }
                Event::Mouse(mouse_event) => {
                    handle_mouse_event(&mut app, mouse_event);
                }
                Event::Resize(_width, _height) => {
                    // Layout recalculates from terminal.size() on next draw
                }
                _ => {
                    // Ignore other event types (paste, focus, etc.)
                }
            }
        }
    }

    // Restore terminal state explicitly (guard will also restore on drop, but this is cleaner)
    guard.restore()?;

    Ok(())
}

fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let quit_binding =
        parse_key_binding(&app.config.key_bindings.quit).map_err(TuiError::KeyBindingError)?;
    if quit_binding.matches(key_event) {
        return Ok(true);
    }

    let clear_binding =
        parse_key_binding(&app.config.key_bindings.clear_all).map_err(TuiError::KeyBindingError)?;
    if clear_binding.matches(key_event) {
        app.clear_all_tags();
        return Ok(false);
    }

    // Everything else goes to the input widget
    app.input.handle_key(key_event);
    Ok(false)
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    // Only the remove affordance of a chip reacts to clicks
    if let Some(value) = hit_test(&app.chip_layout, mouse_event.column, mouse_event.row) {
        let value = value.to_string();
        app.remove_clicked_tag(&value);
    }
}
