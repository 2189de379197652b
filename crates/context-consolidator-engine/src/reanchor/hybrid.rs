//! Hybrid line tracking: exact line matches first, fuzzy matches second,
//! walking the document monotonically.

use crate::document::{TextDocument, TextRange};
use crate::fuzzy::FuzzyMatcher;

use super::ReanchorSettings;
use super::template::{Template, line_equals};

/// Where each template line was placed in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTrack {
    offsets: Vec<Option<usize>>,
}

impl LineTrack {
    /// Byte offset per template line, `None` where the line was not placed.
    pub fn offsets(&self) -> &[Option<usize>] {
        &self.offsets
    }

    /// Placed offsets in template order. Non-decreasing.
    pub fn accepted(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().flatten().copied()
    }

    pub fn matched(&self) -> usize {
        self.accepted().count()
    }

    pub fn match_ratio(&self) -> f64 {
        if self.offsets.is_empty() {
            return 0.0;
        }
        self.matched() as f64 / self.offsets.len() as f64
    }

    /// Whole-line range from the first to the last placed line.
    pub fn range(&self, document: &TextDocument) -> Option<TextRange> {
        let first = self.accepted().min()?;
        let last = self.accepted().max()?;
        Some(document.whole_lines(
            document.line_of_offset(first),
            document.line_of_offset(last),
        ))
    }
}

/// Place every template line in `document`, in order.
///
/// A search cursor only ever moves forward. Each line is tried as an exact
/// (trimmed) line match from the cursor on; failing that, the fuzzy matcher
/// is asked for a hit at or after the cursor, which must also sit within
/// `proximity` bytes of the median of the offsets placed so far. A hit that
/// would go backwards is dropped.
pub fn track_lines<M: FuzzyMatcher>(
    document: &TextDocument,
    template: &Template<'_>,
    matcher: &M,
    settings: &ReanchorSettings,
) -> LineTrack {
    let mut offsets = Vec::with_capacity(template.len());
    let mut accepted: Vec<usize> = Vec::with_capacity(template.len());
    let mut cursor = 0usize;

    for &line in template.lines() {
        let found = exact_line(document, line, cursor, accepted.last().copied())
            .or_else(|| fuzzy_line(document, line, cursor, &accepted, matcher, settings));

        match found {
            Some(offset) if accepted.last().is_none_or(|&prev| offset >= prev) => {
                accepted.push(offset);
                cursor = (offset + line.len()).min(document.len());
                offsets.push(Some(offset));
            }
            _ => offsets.push(None),
        }
    }

    LineTrack { offsets }
}

/// Start offset of the first line, from the one holding `cursor` on, whose
/// trimmed content is `wanted`. The cursor's line is skipped only when it
/// starts at `previous`, the last accepted offset, so one line never holds
/// two matches.
fn exact_line(
    document: &TextDocument,
    wanted: &str,
    cursor: usize,
    previous: Option<usize>,
) -> Option<usize> {
    let lines = document.lines();
    let mut first = document.line_of_offset(cursor);
    if previous == Some(lines[first].content.start) {
        first += 1;
    }

    lines
        .get(first..)?
        .iter()
        .find(|line| line_equals(document, line, wanted))
        .map(|line| line.content.start)
}

fn fuzzy_line<M: FuzzyMatcher>(
    document: &TextDocument,
    wanted: &str,
    cursor: usize,
    accepted: &[usize],
    matcher: &M,
    settings: &ReanchorSettings,
) -> Option<usize> {
    let candidate = matcher
        .find(document.text(), wanted, cursor)
        .filter(|&hit| hit >= cursor)?;

    if accepted.is_empty() {
        return Some(candidate);
    }

    // accepted offsets are non-decreasing, so the slice is already sorted
    let median = accepted[accepted.len() / 2];
    if candidate.abs_diff(median) <= settings.proximity {
        Some(candidate)
    } else {
        log::trace!("fuzzy hit at {candidate} for {wanted:?} is too far from median {median}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::{BitapMatcher, ExactOnly};
    use pretty_assertions::assert_eq;

    /// Matcher that answers with a fixed offset for one pattern.
    struct Scripted {
        pattern: &'static str,
        offset: usize,
    }

    impl FuzzyMatcher for Scripted {
        fn find(&self, _text: &str, pattern: &str, _from: usize) -> Option<usize> {
            (pattern == self.pattern).then_some(self.offset)
        }
    }

    fn track<M: FuzzyMatcher>(doc: &str, captured: &str, matcher: M) -> LineTrack {
        let document = TextDocument::from(doc);
        let template = Template::parse(captured).unwrap();
        track_lines(&document, &template, &matcher, &ReanchorSettings::default())
    }

    #[test]
    fn exact_lines_are_placed_at_line_starts() {
        let t = track("a\n  b\nc", "b\nc", ExactOnly);
        assert_eq!(t.offsets(), &[Some(2), Some(6)]);
        assert_eq!(t.match_ratio(), 1.0);
    }

    #[test]
    fn repeated_lines_match_successive_occurrences() {
        let t = track("    }\n}\nx", "}\n}", ExactOnly);
        assert_eq!(t.offsets(), &[Some(0), Some(6)]);
    }

    #[test]
    fn short_fuzzy_hit_does_not_skip_the_next_line() {
        // the fuzzy hit is two bytes shorter than its template line, so the
        // cursor lands on the following "}" line
        let doc = "fn alpha() {\n    let tot = compute();\n}\n\nfn beta() {\n    x();\n}";
        let t = track(
            doc,
            "fn alpha() {\n    let total = compute();\n}",
            BitapMatcher::default(),
        );
        assert_eq!(t.offsets(), &[Some(0), Some(17), Some(38)]);
    }

    #[test]
    fn missing_lines_are_recorded_and_do_not_move_the_cursor() {
        let t = track("one\ntwo\nthree", "one\ngone\ntwo", ExactOnly);
        assert_eq!(t.offsets(), &[Some(0), None, Some(4)]);
        assert!((t.match_ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lines_before_the_cursor_are_not_revisited() {
        // "alpha" only exists before "beta", so it cannot be placed after it
        let t = track("alpha\nbeta", "beta\nalpha", ExactOnly);
        assert_eq!(t.offsets(), &[Some(6), None]);
    }

    #[test]
    fn fuzzy_hit_near_median_is_accepted() {
        let doc = "let a = 1;\nlet b = 2;\nlet c = 3;";
        let t = track(doc, "let a = 1;\nlet b = 2;\nlet see = 3;", Scripted {
            pattern: "let see = 3;",
            offset: 22,
        });
        assert_eq!(t.offsets(), &[Some(0), Some(11), Some(22)]);
    }

    #[test]
    fn fuzzy_hit_far_from_median_is_rejected() {
        let filler = "x\n".repeat(100);
        let doc = format!("first\nsecond\n{filler}third-ish");
        let far = doc.len() - "third-ish".len();
        let t = track(&doc, "first\nsecond\nthird", Scripted {
            pattern: "third",
            offset: far,
        });
        assert_eq!(t.offsets(), &[Some(0), Some(6), None]);
    }

    #[test]
    fn first_fuzzy_hit_is_accepted_unconditionally() {
        let filler = "x\n".repeat(100);
        let doc = format!("{filler}openning line\nnext");
        let t = track(&doc, "opening line\nnext", BitapMatcher::default());
        assert_eq!(t.offsets(), &[Some(200), Some(214)]);
    }

    #[test]
    fn fuzzy_hits_behind_the_cursor_are_ignored() {
        let t = track("one\ntwo", "two\nuno", Scripted {
            pattern: "uno",
            offset: 0,
        });
        assert_eq!(t.offsets(), &[Some(4), None]);
    }

    #[test]
    fn range_spans_whole_lines_of_extreme_offsets() {
        let document = TextDocument::from("head\n  middle line\ntail");
        let template = Template::parse("middle line\ntail").unwrap();
        let t = track_lines(&document, &template, &ExactOnly, &ReanchorSettings::default());
        let range = t.range(&document).unwrap();
        assert_eq!(document.text_in(range), "  middle line\ntail");
    }

    #[test]
    fn no_placed_lines_gives_no_range() {
        let document = TextDocument::from("abc");
        let template = Template::parse("zzz").unwrap();
        let t = track_lines(&document, &template, &ExactOnly, &ReanchorSettings::default());
        assert_eq!(t.range(&document), None);
        assert_eq!(t.match_ratio(), 0.0);
    }
}
