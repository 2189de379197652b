use serde::{Deserialize, Serialize};

/// What to do when the boundary-marker fallback finds neither marker.
///
/// Without any marker the fallback can only return the whole document, which
/// is indistinguishable from a snippet that really spans the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsePolicy {
    /// Relocate to the whole document, tagged with low confidence
    #[default]
    Accept,
    /// Report the anchor as unrecoverable
    Unrecoverable,
}

/// Tuning values for the re-anchoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReanchorSettings {
    /// Fuzzy matches need at least this similarity (1 - edits / length)
    pub min_similarity: f64,
    /// Max distance in bytes between a fuzzy hit and the median of earlier hits
    pub proximity: usize,
    /// Share of template lines the hybrid strategy must place
    pub min_match_ratio: f64,
    /// Longer patterns use plain substring search instead of Bitap
    pub max_pattern_len: usize,
    /// Bytes of distance from the seed that cost as much as a 100% mismatch
    pub match_distance: usize,
    pub collapse: CollapsePolicy,
}

impl Default for ReanchorSettings {
    fn default() -> Self {
        Self {
            min_similarity: 0.8,
            proximity: 50,
            min_match_ratio: 0.8,
            max_pattern_len: 32,
            match_distance: 1000,
            collapse: CollapsePolicy::Accept,
        }
    }
}
