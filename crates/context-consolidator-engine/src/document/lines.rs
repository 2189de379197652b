use xi_rope::Rope;

use super::span::Span;

/// A single line of a document with its byte spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef {
    /// Zero-based line number.
    pub number: usize,
    /// Span of the line content, terminator excluded.
    pub content: Span,
    /// Span of the line including its `\n` / `\r\n` terminator, if any.
    pub full: Span,
}

/// Builds the line table for a rope.
///
/// Lines are delimited by `\n`, so a rope with `k` newlines has `k + 1`
/// lines: an empty rope yields one empty line, and a trailing newline
/// yields a final empty line. `lines_raw` keeps the terminators, which is
/// what lets the spans stay exact.
pub fn line_table(rope: &Rope) -> Vec<LineRef> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    let mut ends_with_newline = true;

    for raw in rope.lines_raw(..) {
        let start = offset;
        let len = raw.len();
        offset += len;

        let content_len = if let Some(stripped) = raw.strip_suffix("\r\n") {
            stripped.len()
        } else if let Some(stripped) = raw.strip_suffix('\n') {
            stripped.len()
        } else {
            len
        };
        ends_with_newline = raw.ends_with('\n');

        lines.push(LineRef {
            number: lines.len(),
            content: Span::new(start, start + content_len),
            full: Span::new(start, offset),
        });
    }

    if ends_with_newline {
        lines.push(LineRef {
            number: lines.len(),
            content: Span::new(offset, offset),
            full: Span::new(offset, offset),
        });
    }

    lines
}
