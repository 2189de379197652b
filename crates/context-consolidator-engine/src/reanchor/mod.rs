//! # Snippet re-anchoring
//!
//! Given the text a snippet had when it was captured and the current text of
//! its document, find where the snippet lives now.
//!
//! Strategies run in a fixed order:
//!
//! 1. **Hybrid line tracking** ([`hybrid`]): every non-blank template line is
//!    placed exactly or fuzzily, walking the document forward. Succeeds when
//!    at least `min_match_ratio` of the lines were placed.
//! 2. **Boundary markers** ([`boundary`]): the first and last non-blank
//!    template lines are looked up on their own. Always produces a range; when
//!    neither marker is found that range is the whole document and the
//!    [`CollapsePolicy`] decides whether to accept it.
//! 3. **Unrecoverable**: the template has no usable line, or the collapse was
//!    rejected.
//!
//! Relocated ranges always cover whole lines. The template is always the
//! anchor's original captured text, never a previously relocated text, so
//! errors do not compound across edits.

pub mod boundary;
pub mod hybrid;
pub mod settings;
pub mod template;

use log::debug;

use crate::anchor::SnippetAnchor;
use crate::document::{TextDocument, TextRange};
use crate::fuzzy::{BitapMatcher, FuzzyMatcher};

pub use boundary::{BoundaryMatch, boundary_markers};
pub use hybrid::{LineTrack, track_lines};
pub use settings::{CollapsePolicy, ReanchorSettings};
pub use template::Template;

/// Which strategy produced a relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Hybrid,
    BoundaryMarkers,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Hybrid => f.write_str("hybrid"),
            Strategy::BoundaryMarkers => f.write_str("boundary markers"),
        }
    }
}

/// How much a relocation can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    /// Boundary fallback found neither marker and returned the whole document
    Low,
    /// Boundary fallback found at least one marker
    Medium,
    /// Hybrid line tracking placed enough lines
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => f.write_str("low"),
            Confidence::Medium => f.write_str("medium"),
            Confidence::High => f.write_str("high"),
        }
    }
}

/// Why an anchor could not be relocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Reason {
    #[error("captured text has no non-blank line")]
    EmptyTemplate,
    #[error("neither boundary marker was found in the document")]
    BoundaryCollapse,
}

/// New location for an anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub range: TextRange,
    /// Document text at `range`
    pub text: String,
    pub strategy: Strategy,
    pub confidence: Confidence,
}

impl Relocation {
    fn new(
        document: &TextDocument,
        range: TextRange,
        strategy: Strategy,
        confidence: Confidence,
    ) -> Self {
        Self {
            text: document.text_in(range),
            range,
            strategy,
            confidence,
        }
    }
}

/// Result of re-anchoring one snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Relocated(Relocation),
    Unrecoverable(Reason),
}

impl Outcome {
    pub fn relocation(&self) -> Option<&Relocation> {
        match self {
            Outcome::Relocated(relocation) => Some(relocation),
            Outcome::Unrecoverable(_) => None,
        }
    }

    pub fn is_relocated(&self) -> bool {
        matches!(self, Outcome::Relocated(_))
    }
}

/// Re-anchoring engine. Holds only read-only configuration, so one instance
/// can serve any number of anchors, from any thread.
#[derive(Debug, Clone)]
pub struct Reanchorer<M = BitapMatcher> {
    settings: ReanchorSettings,
    matcher: M,
}

impl Reanchorer<BitapMatcher> {
    pub fn new(settings: ReanchorSettings) -> Self {
        let matcher = BitapMatcher::from(&settings);
        Self { settings, matcher }
    }
}

impl Default for Reanchorer<BitapMatcher> {
    fn default() -> Self {
        Self::new(ReanchorSettings::default())
    }
}

impl<M: FuzzyMatcher> Reanchorer<M> {
    /// Engine using a custom fuzzy matcher.
    pub fn with_matcher(settings: ReanchorSettings, matcher: M) -> Self {
        Self { settings, matcher }
    }

    pub fn settings(&self) -> &ReanchorSettings {
        &self.settings
    }

    /// Locate `anchor` in `document`. Never fails: every input yields an
    /// [`Outcome`].
    pub fn reanchor(&self, anchor: &SnippetAnchor, document: &TextDocument) -> Outcome {
        self.reanchor_text(anchor.captured_text(), document)
    }

    /// Locate the snippet whose captured text is `captured_text`.
    pub fn reanchor_text(&self, captured_text: &str, document: &TextDocument) -> Outcome {
        let Some(template) = Template::parse(captured_text) else {
            debug!("captured text is blank; nothing to re-anchor");
            return Outcome::Unrecoverable(Reason::EmptyTemplate);
        };

        let track = track_lines(document, &template, &self.matcher, &self.settings);
        if track.match_ratio() >= self.settings.min_match_ratio
            && let Some(range) = track.range(document)
        {
            debug!(
                "hybrid placed {}/{} lines at {range}",
                track.matched(),
                template.len()
            );
            return Outcome::Relocated(Relocation::new(
                document,
                range,
                Strategy::Hybrid,
                Confidence::High,
            ));
        }

        debug!(
            "hybrid placed {}/{} lines; falling back to boundary markers",
            track.matched(),
            template.len()
        );
        let markers = boundary::scan(document, &template);
        let range = markers.range(document);

        if !markers.is_collapse() {
            return Outcome::Relocated(Relocation::new(
                document,
                range,
                Strategy::BoundaryMarkers,
                Confidence::Medium,
            ));
        }

        match self.settings.collapse {
            CollapsePolicy::Accept => {
                debug!("no boundary marker found; accepting whole document");
                Outcome::Relocated(Relocation::new(
                    document,
                    range,
                    Strategy::BoundaryMarkers,
                    Confidence::Low,
                ))
            }
            CollapsePolicy::Unrecoverable => Outcome::Unrecoverable(Reason::BoundaryCollapse),
        }
    }
}

/// Re-anchor `anchor` against `document_text` with default settings.
pub fn reanchor(anchor: &SnippetAnchor, document_text: &str) -> Outcome {
    Reanchorer::default().reanchor(anchor, &TextDocument::from(document_text))
}
