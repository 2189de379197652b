//! Read-only text document used by the re-anchoring engine.
//!
//! A [`TextDocument`] is an immutable snapshot of a buffer: the text lives in
//! an `xi_rope::Rope`, and a line table built once at construction answers
//! every position/offset question without rescanning the text.

pub mod lines;
pub mod position;
pub mod slice;
pub mod span;

use xi_rope::Rope;

pub use lines::{LineRef, line_table};
pub use position::{Position, TextRange};
pub use slice::{floor_char_boundary, slice_to_string};
pub use span::Span;

/// Snapshot of a document's text with line-indexed access.
#[derive(Clone)]
pub struct TextDocument {
    /// Rope buffer, used for slicing and line iteration
    buffer: Rope,
    /// Flat copy of the text for substring and fuzzy search
    text: String,
    /// One entry per `\n`-delimited line; never empty
    lines: Vec<LineRef>,
}

impl TextDocument {
    /// Create a document from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines. Always at least one.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn lines(&self) -> &[LineRef] {
        &self.lines
    }

    pub fn line(&self, number: usize) -> Option<LineRef> {
        self.lines.get(number).copied()
    }

    /// Content of a line without its terminator.
    pub fn line_text(&self, number: usize) -> Option<&str> {
        self.lines
            .get(number)
            .map(|line| &self.text[line.content.start..line.content.end])
    }

    /// Line containing `offset`. An offset on a terminator belongs to the line
    /// it terminates; offsets past the end map to the last line.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        self.lines
            .partition_point(|line| line.full.end <= offset)
            .min(self.last_line())
    }

    /// Byte offset of a position, clamped into the document.
    pub fn offset_at(&self, pos: Position) -> usize {
        let line = self.lines[pos.line.min(self.last_line())];
        let offset = line.content.start + pos.column.min(line.content.len());
        floor_char_boundary(&self.text, offset)
    }

    /// Position of a byte offset, clamped into the document.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = floor_char_boundary(&self.text, offset);
        let line = self.lines[self.line_of_offset(offset)];
        let column = offset
            .saturating_sub(line.content.start)
            .min(line.content.len());
        Position::new(line.number, column)
    }

    /// Text covered by `range` after clamping it into the document.
    pub fn text_in(&self, range: TextRange) -> String {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        slice_to_string(&self.buffer, Span::new(start, end))
    }

    /// Clamp a range into the document: lines into `0..=last_line`, columns
    /// into the line content, and the end line to be no earlier than the
    /// start line.
    pub fn clamp_range(&self, range: TextRange) -> TextRange {
        let last = self.last_line();

        let start_line = range.start.line.min(last);
        let start_max = self.lines[start_line].content.len();
        let start = Position::new(start_line, range.start.column.min(start_max));

        let end_line = range.end.line.max(start_line).min(last);
        let end_max = self.lines[end_line].content.len();
        let end = Position::new(end_line, range.end.column.min(end_max));

        TextRange::new(start, end)
    }

    /// Range covering whole lines `a..=b`, from column 0 of the earlier line
    /// to the end of the later line's content. Line numbers are clamped.
    pub fn whole_lines(&self, a: usize, b: usize) -> TextRange {
        let last = self.last_line();
        let (first, final_line) = (a.min(b).min(last), a.max(b).min(last));
        TextRange::new(
            Position::new(first, 0),
            Position::new(final_line, self.lines[final_line].content.len()),
        )
    }
}

impl std::fmt::Debug for TextDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDocument")
            .field("len", &self.len())
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl From<&str> for TextDocument {
    fn from(text: &str) -> Self {
        let buffer = Rope::from(text);
        let lines = line_table(&buffer);
        Self {
            buffer,
            text: text.to_string(),
            lines,
        }
    }
}

impl From<String> for TextDocument {
    fn from(text: String) -> Self {
        let buffer = Rope::from(text.as_str());
        let lines = line_table(&buffer);
        Self {
            buffer,
            text,
            lines,
        }
    }
}
