//! Approximate substring search.
//!
//! The re-anchoring engine only needs one capability from a fuzzy matcher:
//! "find something close to `pattern` in `text`, at or after `from`". It is a
//! trait so the engine can run against [`BitapMatcher`] in production and a
//! deterministic stub in tests.

mod bitap;

pub use bitap::{BitapMatcher, MAX_BITS};

/// Seeded approximate substring search.
pub trait FuzzyMatcher {
    /// Byte offset of the best approximate occurrence of `pattern` in `text`
    /// that starts at or after `from`, or `None` when nothing is close enough.
    ///
    /// Returned offsets must lie on a char boundary of `text`.
    fn find(&self, text: &str, pattern: &str, from: usize) -> Option<usize>;
}

impl<M: FuzzyMatcher + ?Sized> FuzzyMatcher for &M {
    fn find(&self, text: &str, pattern: &str, from: usize) -> Option<usize> {
        (**self).find(text, pattern, from)
    }
}

/// Matcher that never finds anything, leaving only exact line matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactOnly;

impl FuzzyMatcher for ExactOnly {
    fn find(&self, _text: &str, _pattern: &str, _from: usize) -> Option<usize> {
        None
    }
}
