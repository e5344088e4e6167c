//! Heuristic response quality scoring, used by `best_of` and the
//! `ConsensusResult.score.quality` field (`spec.md` §4.5).

use hive_core::text::extract_points;

const CONFIDENCE_MARKERS: [&str; 5] = ["definitely", "certainly", "clearly", "without a doubt", "confirmed"];
const HEDGING_MARKERS: [&str; 6] = ["might be", "possibly", "i think", "maybe", "uncertain", "not sure"];

/// Score `text`'s quality from a neutral 0.5 base: length in the
/// `[100, 2000]` char range, presence of a bullet/numbered structure, and
/// confidence-language markers each add 0.1; hedging language subtracts
/// 0.1.
#[must_use]
pub fn quality_heuristic(text: &str) -> f64 {
    let mut score: f64 = 0.5;

    if (100..=2000).contains(&text.len()) {
        score += 0.1;
    }
    if !extract_points(text).is_empty() {
        score += 0.1;
    }

    let lower = text.to_lowercase();
    if CONFIDENCE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        score += 0.1;
    }
    if HEDGING_MARKERS.iter().any(|marker| lower.contains(marker)) {
        score -= 0.1;
    }

    score.clamp(0.0, 1.0)
}
