use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cmp;

use crate::collection::TagCollection;

/// Keyboard adapter over a [`TagCollection`].
///
/// Owns a single-line text buffer with a caret and optional shift-selection.
/// A boundary key submits the buffer to the collection (the keystroke never
/// reaches the buffer); the delete key with the caret at offset 0 and no
/// selection removes the most recently added tag. Everything else edits the
/// buffer. On a rejected submit the buffer is kept so the user can fix it.
#[derive(Debug)]
pub struct TagInput {
    pub collection: TagCollection,
    pub buffer: String,
    pub cursor: usize, // char offset, 0..=buffer chars
    pub selection_start: Option<usize>, // char offset; None if no selection
}

impl TagInput {
    pub fn new(collection: TagCollection) -> Self {
        Self {
            collection,
            buffer: String::new(),
            cursor: 0,
            selection_start: None,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key event. Returns true when the event was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Boundary keys terminate the current tag; their default text
        // insertion is always suppressed, accepted or not
        if self.collection.options().boundary_keys.contains(&key.code)
            && !key.modifiers.contains(KeyModifiers::CONTROL)
        {
            let candidate = self.buffer.clone();
            if self.collection.add(&candidate) {
                self.buffer.clear();
                self.cursor = 0;
                self.selection_start = None;
            }
            return true;
        }

        // Delete key at caret start with no selection pops the newest tag.
        // A safe no-op when the collection is empty.
        if key.code == self.collection.options().delete_key
            && self.cursor == 0
            && !self.has_selection()
        {
            self.collection.remove_last();
            return true;
        }

        let extend_selection = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.delete_char();
                true
            }
            KeyCode::Delete => {
                self.delete_char_forward();
                true
            }
            KeyCode::Left => {
                self.move_cursor_left(extend_selection);
                true
            }
            KeyCode::Right => {
                self.move_cursor_right(extend_selection);
                true
            }
            KeyCode::Home => {
                self.move_cursor_home(extend_selection);
                true
            }
            KeyCode::End => {
                self.move_cursor_end(extend_selection);
                true
            }
            _ => false,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        // Typing over a selection replaces it
        if self.has_selection() {
            self.delete_selection();
        }
        let mut chars: Vec<char> = self.buffer.chars().collect();
        let col = cmp::min(self.cursor, chars.len());
        chars.insert(col, ch);
        self.buffer = chars.into_iter().collect();
        self.cursor = col + 1;
        self.selection_start = None;
    }

    pub fn delete_char(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        if self.cursor == 0 {
            return;
        }
        let mut chars: Vec<char> = self.buffer.chars().collect();
        let col = cmp::min(self.cursor, chars.len());
        if col > 0 {
            chars.remove(col - 1);
            self.buffer = chars.into_iter().collect();
            self.cursor = col - 1;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        let mut chars: Vec<char> = self.buffer.chars().collect();
        if self.cursor < chars.len() {
            chars.remove(self.cursor);
            self.buffer = chars.into_iter().collect();
        }
    }

    pub fn move_cursor_left(&mut self, extend_selection: bool) {
        self.track_selection(extend_selection);
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self, extend_selection: bool) {
        self.track_selection(extend_selection);
        let len = self.buffer.chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self, extend_selection: bool) {
        self.track_selection(extend_selection);
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self, extend_selection: bool) {
        self.track_selection(extend_selection);
        self.cursor = self.buffer.chars().count();
    }

    fn track_selection(&mut self, extend_selection: bool) {
        if extend_selection {
            if self.selection_start.is_none() {
                self.selection_start = Some(self.cursor);
            }
        } else {
            self.selection_start = None;
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection_start.is_some() && self.selection_start != Some(self.cursor)
    }

    /// Normalized (start, end) char offsets of the selection
    pub fn selection_bounds(&self) -> Option<(usize, usize)> {
        let start = self.selection_start?;
        if start == self.cursor {
            return None;
        }
        Some((
            cmp::min(start, self.cursor),
            cmp::max(start, self.cursor),
        ))
    }

    pub fn delete_selection(&mut self) {
        if let Some((start, end)) = self.selection_bounds() {
            let mut chars: Vec<char> = self.buffer.chars().collect();
            let end = cmp::min(end, chars.len());
            let start = cmp::min(start, end);
            chars.drain(start..end);
            self.buffer = chars.into_iter().collect();
            self.cursor = start;
        }
        self.selection_start = None;
    }
}
