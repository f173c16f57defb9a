use focus_mode::traits::TextOps;
use focus_mode::types::{Command, Position};
use focus_mode::word;
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

pub struct MockBuffer {
    rope: Rope,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Cursor position at the end of the given line.
    pub fn line_end(&self, line: u32) -> Position {
        Position {
            line,
            col: self.line_len(line),
        }
    }

    pub fn insert_char(&mut self, pos: Position, ch: char) {
        let idx = self.char_idx(pos);
        self.rope.insert_char(idx, ch);
    }

    /// Applies a `Delete` command; mode switches are the host's concern and
    /// ignored here.
    pub fn apply(&mut self, cmd: &Command) {
        if let Command::Delete { range } = cmd {
            let start = self.char_idx(range.start);
            let end = self.char_idx(range.end);
            self.rope.remove(start..end);
        }
    }

    fn line_str(&self, line: u32) -> String {
        if line as usize >= self.rope.len_lines() {
            return String::new();
        }
        let line_ref = self.rope.line(line as usize);
        let mut s = line_ref.to_string();
        // Remove trailing newline if present
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    fn grapheme_count(&self, s: &str) -> u32 {
        s.graphemes(true).count() as u32
    }

    fn char_idx(&self, pos: Position) -> usize {
        if pos.line as usize >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(pos.line as usize);
        let line = self.line_str(pos.line);
        let mut idx = line_start;
        for (n, grapheme) in line.graphemes(true).enumerate() {
            if n >= pos.col as usize {
                break;
            }
            idx += grapheme.chars().count();
        }
        idx
    }
}

impl TextOps for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_len(&self, line: u32) -> u32 {
        self.grapheme_count(&self.line_str(line))
    }

    fn prev_word_start(&self, pos: Position) -> Position {
        Position {
            line: pos.line,
            col: word::prev_word_start(&self.line_str(pos.line), pos.col),
        }
    }
}
