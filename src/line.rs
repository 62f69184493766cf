//! Line representation and text operations

use unicode_width::UnicodeWidthChar;

/// Width of one indentation level, in columns
pub const INDENT_WIDTH: usize = 4;

/// One indentation unit as inserted text
pub const INDENT_UNIT: &str = "    ";

/// Leading run of spaces and tabs
pub fn leading_indent(text: &str) -> &str {
    let end = text
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(text.len());
    &text[..end]
}

/// Measured width of a whitespace run, tabs counting as one full unit
pub fn indent_width(whitespace: &str) -> usize {
    whitespace
        .chars()
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum()
}

/// Whether everything before `col` is spaces or tabs
pub fn is_whitespace_prefix(text: &str, col: usize) -> bool {
    text.get(..col)
        .map(|prefix| prefix.chars().all(|c| c == ' ' || c == '\t'))
        .unwrap_or(false)
}

/// Screen columns taken by one character; a tab is drawn as one unit
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        INDENT_WIDTH
    } else {
        ch.width().unwrap_or(1)
    }
}

/// Screen columns taken by a string
pub fn str_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// A single line of text in a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the display width of the line
    pub fn display_width(&self) -> usize {
        str_width(&self.text)
    }

    /// Leading indentation of this line
    pub fn indent(&self) -> &str {
        leading_indent(&self.text)
    }

    /// Insert a string at byte position
    pub fn insert_str(&mut self, byte_pos: usize, s: &str) {
        self.text.insert_str(byte_pos, s);
    }

    /// Delete a range of bytes and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        self.text.drain(start..end).collect()
    }

    /// Split the line at byte position, returning the remainder
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        Line::from(self.text.split_off(byte_pos))
    }

    /// Append a string to this line
    pub fn append_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Clamp a byte position to the line and back onto a char boundary
    pub fn clamp_col(&self, col: usize) -> usize {
        let mut col = col.min(self.text.len());
        while col > 0 && !self.text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    /// Byte offset of the character after `col`, or `None` at end of line
    pub fn next_boundary(&self, col: usize) -> Option<usize> {
        self.text[col..].chars().next().map(|c| col + c.len_utf8())
    }

    /// Byte offset of the character before `col`, or `None` at line start
    pub fn prev_boundary(&self, col: usize) -> Option<usize> {
        self.text[..col].chars().next_back().map(|c| col - c.len_utf8())
    }

    /// Get byte position for a given column (display position),
    /// clamped to the end of the line
    pub fn col_to_byte(&self, col: usize) -> usize {
        let mut current_col = 0;
        for (byte_idx, ch) in self.text.char_indices() {
            if current_col >= col {
                return byte_idx;
            }
            current_col += char_width(ch);
        }
        self.text.len()
    }

    /// Get column (display position) for a given byte position
    pub fn byte_to_col(&self, byte_pos: usize) -> usize {
        str_width(&self.text[..self.clamp_col(byte_pos)])
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self { text: s }
    }
}
