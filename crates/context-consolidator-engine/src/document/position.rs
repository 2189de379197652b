use serde::{Deserialize, Serialize};

/// A zero-based `(line, column)` location in a document.
///
/// Columns are byte offsets within the line content. The derived ordering is
/// document order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A `start..end` range of positions with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    /// Creates a range, swapping the endpoints if they are given in reverse.
    pub fn new(a: Position, b: Position) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of lines the range touches. A reversed range counts as one line.
    pub fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}

impl std::fmt::Display for TextRange {
    /// One-based line numbers, the way editors show them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lines {}-{}", self.start.line + 1, self.end.line + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_reversed_endpoints() {
        let r = TextRange::new(Position::new(4, 2), Position::new(1, 0));
        assert_eq!(r.start, Position::new(1, 0));
        assert_eq!(r.end, Position::new(4, 2));
    }

    #[test]
    fn positions_compare_in_document_order() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 0) < Position::new(2, 1));
    }

    #[test]
    fn display_is_one_based() {
        let r = TextRange::new(Position::new(11, 0), Position::new(16, 7));
        assert_eq!(r.to_string(), "lines 12-17");
        assert_eq!(r.line_count(), 6);
    }

    #[test]
    fn line_count_of_hand_built_reversed_range_does_not_underflow() {
        let r = TextRange {
            start: Position::new(5, 0),
            end: Position::new(2, 0),
        };
        assert_eq!(r.line_count(), 1);
    }
}
