//! Boundary-marker fallback: locate the snippet by its first and last
//! non-blank lines only.

use crate::document::{TextDocument, TextRange};

use super::template::{Template, line_equals};

/// Lines found for the opening and closing markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMatch {
    pub start_line: usize,
    pub end_line: usize,
    /// False when the opening marker was missing and `start_line` defaulted to 0
    pub start_found: bool,
    /// False when the closing marker was missing and `end_line` defaulted to the last line
    pub end_found: bool,
}

impl BoundaryMatch {
    /// Neither marker was found, so the match is the whole document.
    pub fn is_collapse(&self) -> bool {
        !self.start_found && !self.end_found
    }

    /// Whole-line range between the two marker lines, in document order.
    pub fn range(&self, document: &TextDocument) -> TextRange {
        document.whole_lines(self.start_line, self.end_line)
    }
}

/// First line equal to the opening marker, last line equal to the closing one.
pub fn scan(document: &TextDocument, template: &Template<'_>) -> BoundaryMatch {
    let lines = document.lines();
    let start = lines
        .iter()
        .position(|line| line_equals(document, line, template.first()));
    let end = lines
        .iter()
        .rposition(|line| line_equals(document, line, template.last()));

    BoundaryMatch {
        start_line: start.unwrap_or(0),
        end_line: end.unwrap_or(document.last_line()),
        start_found: start.is_some(),
        end_found: end.is_some(),
    }
}

/// Run the boundary-marker fallback on its own.
///
/// Returns `None` when `captured_text` has no non-blank line to use as a marker.
pub fn boundary_markers(captured_text: &str, document: &TextDocument) -> Option<BoundaryMatch> {
    Template::parse(captured_text).map(|template| scan(document, &template))
}
