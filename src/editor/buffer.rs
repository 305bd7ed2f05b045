use ropey::Rope;
use unicode_width::UnicodeWidthChar;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// The cursor's position without the sticky column.
    pub const fn pos(self) -> BufferPos {
        BufferPos {
            line: self.line,
            col: self.col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// A (line, byte column) position. Orders by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BufferPos {
    pub line: usize,
    pub col: usize,
}

impl BufferPos {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// An ordered, non-empty selected range. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: BufferPos,
    pub end: BufferPos,
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// Besides the cursor, the buffer tracks a selection anchor set by a mouse
/// press. The selected span runs between the anchor and the cursor. Any edit
/// drops the anchor.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<BufferPos>,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole content. The cursor lands at the end of the new text.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.anchor = None;
        self.move_to_end();
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.anchor = None;
        let char_idx = self.pos_char_idx(self.cursor.pos());
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.anchor = None;
        let char_idx = self.pos_char_idx(self.cursor.pos());
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        self.anchor = None;
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        let char_idx = self.pos_char_idx(self.cursor.pos());
        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        self.anchor = None;
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let char_idx = self.pos_char_idx(self.cursor.pos());
        self.rope.remove(char_idx..=char_idx);
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor to a specific line and column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to the end of the buffer.
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Selection ---

    /// Start a selection at `(line, col)` (mouse press).
    pub fn begin_selection(&mut self, line: usize, col: usize) {
        self.move_to(line, col);
        self.anchor = Some(self.cursor.pos());
    }

    /// Move the selection's active end to `(line, col)` (mouse drag/release).
    ///
    /// Without a prior [`begin_selection`](Self::begin_selection) this only
    /// moves the cursor.
    pub fn extend_selection(&mut self, line: usize, col: usize) {
        self.move_to(line, col);
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// The selected span, ordered. `None` when nothing or an empty range is selected.
    pub fn selection_span(&self) -> Option<Span> {
        let anchor = self.anchor?;
        let active = self.cursor.pos();
        if anchor == active {
            return None;
        }
        Some(Span {
            start: anchor.min(active),
            end: anchor.max(active),
        })
    }

    /// Text covered by the current selection.
    pub fn selected_text(&self) -> Option<String> {
        let span = self.selection_span()?;
        let start = self.pos_char_idx(span.start);
        let end = self.pos_char_idx(span.end);
        Some(self.rope.slice(start..end).to_string())
    }

    // --- Display columns ---

    /// Terminal column width of `line` up to byte offset `col`.
    pub fn display_col(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let col = floor_char_boundary(&text, col);
        text[..col]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Byte offset on `line` of the character drawn at terminal column `display`.
    ///
    /// Columns past the end of the line map to the line end.
    pub fn col_for_display(&self, line: usize, display: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut width = 0usize;
        for (idx, ch) in text.char_indices() {
            let w = ch.width().unwrap_or(0);
            if width + w > display {
                return idx;
            }
            width += w;
        }
        text.len()
    }

    // --- Private helpers ---

    /// Convert a (line, byte col) position to a ropey char index.
    fn pos_char_idx(&self, pos: BufferPos) -> usize {
        let line_idx = pos.line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line_idx);
        let line_str = self.rope.line(line_idx).to_string();
        let byte_col = floor_char_boundary(&line_str, pos.col.min(line_str.len()));
        line_start + line_str[..byte_col].chars().count()
    }

    fn move_left(&mut self) {
        self.anchor = None;
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        self.anchor = None;
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        self.anchor = None;
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        self.anchor = None;
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .finish()
    }
}
