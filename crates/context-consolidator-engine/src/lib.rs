pub mod anchor;
pub mod document;
pub mod fuzzy;
pub mod reanchor;
pub mod session;

// Re-export key types for easier usage
pub use anchor::{AnchorId, DocumentId, SnippetAnchor};
pub use document::{Position, TextDocument, TextRange};
pub use fuzzy::{BitapMatcher, FuzzyMatcher};
pub use reanchor::{
    CollapsePolicy, Confidence, Outcome, Reanchorer, ReanchorSettings, Reason, Relocation,
    Strategy, boundary_markers, reanchor,
};
pub use session::{ChangeReport, Session, SessionError};
