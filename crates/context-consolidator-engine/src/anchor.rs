use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{TextDocument, TextRange};
use crate::reanchor::Outcome;

/// Unique identifier for a snippet anchor
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct AnchorId(pub Uuid);

impl AnchorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnchorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the buffer a snippet belongs to, typically a URI.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A captured snippet plus its tracked location.
///
/// `captured_text` is the template every re-anchor matches against and is
/// never rewritten; only `current_range` and `current_text` follow the
/// document as it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnippetAnchor {
    pub id: AnchorId,
    pub owner: DocumentId,
    captured_text: String,
    original_range: TextRange,
    pub current_range: TextRange,
    pub current_text: String,
    /// Line just above the selection at capture time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<String>,
    /// Line just below the selection at capture time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<String>,
}

impl SnippetAnchor {
    /// Anchor for text the caller already holds, with no surrounding context.
    pub fn new(owner: DocumentId, captured_text: impl Into<String>, range: TextRange) -> Self {
        let captured_text = captured_text.into();
        Self {
            id: AnchorId::new(),
            owner,
            current_text: captured_text.clone(),
            captured_text,
            original_range: range,
            current_range: range,
            context_before: None,
            context_after: None,
        }
    }

    /// Capture `range` of `document`, recording the lines around it.
    ///
    /// The range is clamped into the document first.
    pub fn capture(owner: DocumentId, document: &TextDocument, range: TextRange) -> Self {
        let range = document.clamp_range(range);
        let text = document.text_in(range);

        let context_before = range
            .start
            .line
            .checked_sub(1)
            .and_then(|line| document.line_text(line))
            .map(str::to_string);
        let context_after = if range.end.line < document.last_line() {
            document.line_text(range.end.line + 1).map(str::to_string)
        } else {
            None
        };

        Self {
            context_before,
            context_after,
            ..Self::new(owner, text, range)
        }
    }

    pub fn captured_text(&self) -> &str {
        &self.captured_text
    }

    pub fn original_range(&self) -> TextRange {
        self.original_range
    }

    /// Move the anchor to a relocation. An unrecoverable outcome leaves the
    /// anchor where it was. Returns whether the outcome was a relocation.
    pub fn apply(&mut self, outcome: &Outcome) -> bool {
        match outcome {
            Outcome::Relocated(relocation) => {
                self.current_range = relocation.range;
                self.current_text.clone_from(&relocation.text);
                true
            }
            Outcome::Unrecoverable(_) => false,
        }
    }
}
