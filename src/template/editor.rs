use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use super::worker::TemplateOrigin;

/// Minimal multiline edit buffer for the template editor overlay.
/// Cursor addressing is by grapheme cluster within a line. There is
/// always at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect::<Vec<_>>();
        Self {
            lines,
            row: 0,
            col: 0,
        }
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (row, grapheme column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(line: &str) -> usize {
        line.graphemes(true).count()
    }

    fn byte_offset(line: &str, col: usize) -> usize {
        line.grapheme_indices(true)
            .nth(col)
            .map(|(offset, _)| offset)
            .unwrap_or(line.len())
    }

    fn current_line(&self) -> &str {
        &self.lines[self.row]
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = Self::byte_offset(self.current_line(), self.col);
        self.lines[self.row].insert(at, ch);
        self.col += 1;
    }

    pub fn insert_newline(&mut self) {
        let at = Self::byte_offset(self.current_line(), self.col);
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let start = Self::byte_offset(self.current_line(), self.col - 1);
            let end = Self::byte_offset(self.current_line(), self.col);
            self.lines[self.row].replace_range(start..end, "");
            self.col -= 1;
        } else if self.row > 0 {
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = Self::line_len(self.current_line());
            self.lines[self.row].push_str(&tail);
        }
    }

    pub fn delete(&mut self) {
        let len = Self::line_len(self.current_line());
        if self.col < len {
            let start = Self::byte_offset(self.current_line(), self.col);
            let end = Self::byte_offset(self.current_line(), self.col + 1);
            self.lines[self.row].replace_range(start..end, "");
        } else if self.row + 1 < self.lines.len() {
            let tail = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&tail);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = Self::line_len(self.current_line());
        }
    }

    pub fn move_right(&mut self) {
        if self.col < Self::line_len(self.current_line()) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(Self::line_len(self.current_line()));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(Self::line_len(self.current_line()));
        }
    }

    pub fn move_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_line_end(&mut self) {
        self.col = Self::line_len(self.current_line());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Editing,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKeyResult {
    Consumed,
    SaveRequested,
    CloseRequested,
}

/// One modal editing session over a fetched template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    pub origin: TemplateOrigin,
    pub name: String,
    pub buffer: TextBuffer,
    pub phase: EditorPhase,
}

impl EditorSession {
    pub fn new(origin: TemplateOrigin, name: impl Into<String>, content: &str) -> Self {
        Self {
            origin,
            name: name.into(),
            buffer: TextBuffer::from_text(content),
            phase: EditorPhase::Editing,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.phase == EditorPhase::Saving
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorKeyResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => EditorKeyResult::SaveRequested,
                _ => EditorKeyResult::Consumed,
            };
        }

        match key.code {
            KeyCode::Esc => return EditorKeyResult::CloseRequested,
            KeyCode::Enter => self.buffer.insert_newline(),
            KeyCode::Backspace => self.buffer.backspace(),
            KeyCode::Delete => self.buffer.delete(),
            KeyCode::Left => self.buffer.move_left(),
            KeyCode::Right => self.buffer.move_right(),
            KeyCode::Up => self.buffer.move_up(),
            KeyCode::Down => self.buffer.move_down(),
            KeyCode::Home => self.buffer.move_line_start(),
            KeyCode::End => self.buffer.move_line_end(),
            KeyCode::Char(ch) => self.buffer.insert_char(ch),
            _ => {}
        }
        EditorKeyResult::Consumed
    }
}
