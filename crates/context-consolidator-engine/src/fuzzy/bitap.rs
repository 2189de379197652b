use crate::document::floor_char_boundary;
use crate::reanchor::ReanchorSettings;

use super::FuzzyMatcher;

/// Width of the bit-vector the matcher can track. Patterns longer than the
/// configured limit (never more than this) fall back to plain substring search.
pub const MAX_BITS: usize = 64;

/// Bitap (shift-and with errors) approximate matcher.
///
/// A candidate needs at most `floor(len * (1 - min_similarity))` byte edits
/// (substitutions, insertions, deletions). Among candidates the one with the
/// lowest `errors / len + (start - from) / match_distance` wins, so a close
/// match near the seed beats a perfect match far away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapMatcher {
    pub min_similarity: f64,
    pub max_pattern_len: usize,
    pub match_distance: usize,
}

impl Default for BitapMatcher {
    fn default() -> Self {
        Self::from(&ReanchorSettings::default())
    }
}

impl From<&ReanchorSettings> for BitapMatcher {
    fn from(settings: &ReanchorSettings) -> Self {
        Self {
            min_similarity: settings.min_similarity,
            max_pattern_len: settings.max_pattern_len,
            match_distance: settings.match_distance,
        }
    }
}

impl BitapMatcher {
    /// Most edits a pattern of `len` bytes may carry and still match.
    pub fn max_errors(&self, len: usize) -> usize {
        let slack = (1.0 - self.min_similarity).clamp(0.0, 1.0);
        let errors = (slack * len as f64 + 1e-9).floor() as usize;
        errors.min(len.saturating_sub(1))
    }
}

impl FuzzyMatcher for BitapMatcher {
    fn find(&self, text: &str, pattern: &str, from: usize) -> Option<usize> {
        if pattern.is_empty() {
            return None;
        }
        let from = floor_char_boundary(text, from);
        let haystack = &text[from..];

        if haystack.starts_with(pattern) {
            return Some(from);
        }
        if pattern.len() > self.max_pattern_len.min(MAX_BITS) {
            return haystack.find(pattern).map(|at| from + at);
        }

        let needle = pattern.as_bytes();
        let bytes = haystack.as_bytes();
        let distance = self.match_distance.max(1) as f64;

        let mut best: Option<(f64, usize)> = None;
        for errors in 0..=self.max_errors(needle.len()) {
            let Some(end) = earliest_match_end(bytes, needle, errors) else {
                continue;
            };
            let start = refine_start(bytes, needle, end, errors);
            let score = errors as f64 / needle.len() as f64 + start as f64 / distance;
            if best.is_none_or(|(best_score, _)| score < best_score) {
                best = Some((score, start));
            }
        }

        best.map(|(_, start)| floor_char_boundary(text, from + start))
    }
}

/// Index of the last byte of the earliest match of `pattern` in `text` with
/// at most `k` edits. `pattern` must be 1..=MAX_BITS bytes and `k < len`.
fn earliest_match_end(text: &[u8], pattern: &[u8], k: usize) -> Option<usize> {
    let accept = 1u64 << (pattern.len() - 1);

    let mut masks = [0u64; 256];
    for (i, &b) in pattern.iter().enumerate() {
        masks[b as usize] |= 1 << i;
    }

    // state[d] bit i: pattern[..=i] matches a suffix of the text read so far
    // with at most d edits. Initially the first d pattern bytes may be deleted.
    let mut state: Vec<u64> = (0..=k).map(|d| (1u64 << d) - 1).collect();

    for (pos, &byte) in text.iter().enumerate() {
        let mask = masks[byte as usize];
        let mut prev_old = state[0];
        state[0] = ((state[0] << 1) | 1) & mask;

        for d in 1..=k {
            let old = state[d];
            state[d] = (((old << 1) | 1) & mask) // match
                | prev_old // extra text byte
                | ((prev_old << 1) | 1) // substitution
                | ((state[d - 1] << 1) | 1); // skipped pattern byte
            prev_old = old;
        }

        if state[k] & accept != 0 {
            return Some(pos);
        }
    }
    None
}

/// Start of a match ending at `end` with at most `k` edits.
///
/// Bitap only reports where a match ends, so the start is recovered by
/// trying every start the edit budget allows and keeping the one with the
/// smallest edit distance, nearest to `end + 1 - len` on ties.
fn refine_start(text: &[u8], pattern: &[u8], end: usize, k: usize) -> usize {
    let nominal = (end + 1).saturating_sub(pattern.len());
    let lowest = nominal.saturating_sub(k);
    let highest = (nominal + k).min(end + 1);

    (lowest..=highest)
        .map(|start| {
            let cost = edit_distance(pattern, &text[start..end + 1]);
            (cost, start.abs_diff(nominal), start)
        })
        .min()
        .map_or(nominal, |(_, _, start)| start)
}

/// Levenshtein distance over bytes.
fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
