//! Collection of snippet anchors and the engine that keeps them in place.

use log::warn;

use crate::anchor::{AnchorId, DocumentId, SnippetAnchor};
use crate::document::{TextDocument, TextRange};
use crate::reanchor::{Outcome, Reanchorer, Reason, ReanchorSettings};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Selection is empty")]
    EmptySelection,
    #[error("Snippet already captured as {0}")]
    Duplicate(AnchorId),
}

/// What happened to each anchor of a document after it changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub relocated: Vec<AnchorId>,
    pub unrecoverable: Vec<(AnchorId, Reason)>,
}

impl ChangeReport {
    pub fn is_clean(&self) -> bool {
        self.unrecoverable.is_empty()
    }
}

/// Snippet anchors in insertion order, plus the engine used to re-anchor them.
#[derive(Debug, Default)]
pub struct Session {
    anchors: Vec<SnippetAnchor>,
    reanchorer: Reanchorer,
}

impl Session {
    pub fn new(settings: ReanchorSettings) -> Self {
        Self {
            anchors: Vec::new(),
            reanchorer: Reanchorer::new(settings),
        }
    }

    /// Capture `range` of `document` as a new anchor owned by `owner`.
    pub fn capture(
        &mut self,
        owner: DocumentId,
        document: &TextDocument,
        range: TextRange,
    ) -> Result<AnchorId, SessionError> {
        let range = document.clamp_range(range);
        if range.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        if let Some(existing) = self
            .anchors
            .iter()
            .find(|a| a.owner == owner && a.current_range == range)
        {
            return Err(SessionError::Duplicate(existing.id));
        }

        let anchor = SnippetAnchor::capture(owner, document, range);
        let id = anchor.id;
        self.anchors.push(anchor);
        Ok(id)
    }

    /// Add an anchor built elsewhere, e.g. restored from disk.
    pub fn insert(&mut self, anchor: SnippetAnchor) -> Result<AnchorId, SessionError> {
        if let Some(existing) = self.anchors.iter().find(|a| a.id == anchor.id) {
            return Err(SessionError::Duplicate(existing.id));
        }
        let id = anchor.id;
        self.anchors.push(anchor);
        Ok(id)
    }

    pub fn remove(&mut self, id: AnchorId) -> Option<SnippetAnchor> {
        let index = self.anchors.iter().position(|a| a.id == id)?;
        Some(self.anchors.remove(index))
    }

    pub fn get(&self, id: AnchorId) -> Option<&SnippetAnchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnippetAnchor> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn anchors_for<'a>(
        &'a self,
        owner: &'a DocumentId,
    ) -> impl Iterator<Item = &'a SnippetAnchor> + 'a {
        self.anchors.iter().filter(move |a| &a.owner == owner)
    }

    pub fn reanchorer(&self) -> &Reanchorer {
        &self.reanchorer
    }

    /// Re-anchor every anchor of `owner` against its new text.
    ///
    /// Unrecoverable anchors keep their previous location.
    pub fn document_changed(
        &mut self,
        owner: &DocumentId,
        document: &TextDocument,
    ) -> ChangeReport {
        let mut report = ChangeReport::default();

        for anchor in self.anchors.iter_mut().filter(|a| &a.owner == owner) {
            let outcome = self.reanchorer.reanchor(anchor, document);
            match outcome {
                Outcome::Relocated(_) => {
                    anchor.apply(&outcome);
                    report.relocated.push(anchor.id);
                }
                Outcome::Unrecoverable(reason) => {
                    warn!(
                        "Snippet {} in {owner} could not be re-anchored: {reason}",
                        anchor.id
                    );
                    report.unrecoverable.push((anchor.id, reason));
                }
            }
        }

        report
    }

    /// Fresh read of an anchor's current range, clamped into `document`.
    pub fn current_text(&self, id: AnchorId, document: &TextDocument) -> Option<String> {
        let anchor = self.get(id)?;
        Some(document.text_in(document.clamp_range(anchor.current_range)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;
    use crate::reanchor::CollapsePolicy;
    use pretty_assertions::assert_eq;

    fn owner(name: &str) -> DocumentId {
        DocumentId::from(name)
    }

    #[test]
    fn capture_rejects_empty_selection() {
        let mut session = Session::default();
        let doc = TextDocument::from("abc");
        let caret = TextRange::new(Position::new(0, 1), Position::new(0, 1));
        assert_eq!(
            session.capture(owner("a"), &doc, caret),
            Err(SessionError::EmptySelection)
        );
        assert!(session.is_empty());
    }

    #[test]
    fn capture_rejects_duplicate_range_in_same_document() {
        let mut session = Session::default();
        let doc = TextDocument::from("one\ntwo");
        let range = doc.whole_lines(0, 1);

        let first = session.capture(owner("a"), &doc, range).unwrap();
        assert_eq!(
            session.capture(owner("a"), &doc, range),
            Err(SessionError::Duplicate(first))
        );
        // same range in another document is a different snippet
        assert!(session.capture(owner("b"), &doc, range).is_ok());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn duplicate_check_uses_the_clamped_range() {
        let mut session = Session::default();
        let doc = TextDocument::from("one\ntwo");
        let first = session.capture(owner("a"), &doc, doc.whole_lines(0, 1)).unwrap();
        let overshoot = TextRange::new(Position::new(0, 0), Position::new(7, 99));
        assert_eq!(
            session.capture(owner("a"), &doc, overshoot),
            Err(SessionError::Duplicate(first))
        );
    }

    #[test]
    fn duplicate_check_follows_re_anchored_ranges() {
        let mut session = Session::default();
        let doc = TextDocument::from("one\ntwo\nthree");
        let id = session.capture(owner("a"), &doc, doc.whole_lines(1, 1)).unwrap();

        let edited = TextDocument::from("zero\none\ntwo\nthree");
        session.document_changed(&owner("a"), &edited);
        assert_eq!(session.get(id).unwrap().current_range, edited.whole_lines(2, 2));

        assert_eq!(
            session.capture(owner("a"), &edited, edited.whole_lines(2, 2)),
            Err(SessionError::Duplicate(id))
        );
        // the old location now holds different text and is free to capture
        assert!(session.capture(owner("a"), &edited, edited.whole_lines(1, 1)).is_ok());
    }

    #[test]
    fn remove_and_get() {
        let mut session = Session::default();
        let doc = TextDocument::from("one\ntwo");
        let id = session.capture(owner("a"), &doc, doc.whole_lines(1, 1)).unwrap();

        assert_eq!(session.get(id).map(|a| a.captured_text()), Some("two"));
        assert_eq!(session.remove(id).map(|a| a.id), Some(id));
        assert_eq!(session.get(id), None);
        assert_eq!(session.remove(id), None);
    }

    #[test]
    fn insert_rejects_reused_id() {
        let mut session = Session::default();
        let anchor = SnippetAnchor::new(owner("a"), "text", TextRange::default());
        session.insert(anchor.clone()).unwrap();
        assert_eq!(
            session.insert(anchor.clone()),
            Err(SessionError::Duplicate(anchor.id))
        );
    }

    #[test]
    fn document_changed_only_touches_that_document() {
        let mut session = Session::default();
        let doc = TextDocument::from("alpha\nbeta\ngamma");
        let in_a = session.capture(owner("a"), &doc, doc.whole_lines(1, 1)).unwrap();
        let in_b = session.capture(owner("b"), &doc, doc.whole_lines(1, 1)).unwrap();

        let edited = TextDocument::from("new\nalpha\nbeta\ngamma");
        let report = session.document_changed(&owner("a"), &edited);

        assert_eq!(report.relocated, vec![in_a]);
        assert!(report.is_clean());
        assert_eq!(session.get(in_a).unwrap().current_range, edited.whole_lines(2, 2));
        assert_eq!(session.get(in_b).unwrap().current_range, doc.whole_lines(1, 1));
        assert_eq!(session.anchors_for(&owner("a")).count(), 1);
    }

    #[test]
    fn unrecoverable_anchors_keep_their_range() {
        let settings = ReanchorSettings {
            collapse: CollapsePolicy::Unrecoverable,
            ..ReanchorSettings::default()
        };
        let mut session = Session::new(settings);
        let doc = TextDocument::from("keep\nthis line");
        let id = session.capture(owner("a"), &doc, doc.whole_lines(1, 1)).unwrap();

        let edited = TextDocument::from("nothing alike");
        let report = session.document_changed(&owner("a"), &edited);

        assert_eq!(report.unrecoverable, vec![(id, Reason::BoundaryCollapse)]);
        assert!(report.relocated.is_empty());
        let anchor = session.get(id).unwrap();
        assert_eq!(anchor.current_range, doc.whole_lines(1, 1));
        assert_eq!(anchor.current_text, "this line");
    }

    #[test]
    fn current_text_reads_clamped_range() {
        let mut session = Session::default();
        let doc = TextDocument::from("one\ntwo\nthree");
        let id = session.capture(owner("a"), &doc, doc.whole_lines(1, 2)).unwrap();

        let shorter = TextDocument::from("one\ntw");
        assert_eq!(session.current_text(id, &shorter).as_deref(), Some("tw"));
        assert_eq!(session.current_text(AnchorId::new(), &shorter), None);
    }
}
