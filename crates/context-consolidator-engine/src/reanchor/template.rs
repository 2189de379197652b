use crate::document::{LineRef, TextDocument};

/// The non-blank, trimmed lines of a snippet's captured text.
///
/// Never empty: [`Template::parse`] returns `None` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Template<'a> {
    pub fn parse(captured_text: &'a str) -> Option<Self> {
        let lines: Vec<&str> = captured_text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        (!lines.is_empty()).then_some(Self { lines })
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First non-blank line, used as the opening boundary marker.
    pub fn first(&self) -> &'a str {
        self.lines[0]
    }

    /// Last non-blank line, used as the closing boundary marker.
    pub fn last(&self) -> &'a str {
        self.lines[self.lines.len() - 1]
    }
}

/// True when the trimmed content of `line` equals `wanted`.
pub(crate) fn line_equals(document: &TextDocument, line: &LineRef, wanted: &str) -> bool {
    document
        .line_text(line.number)
        .is_some_and(|text| text.trim() == wanted)
}
