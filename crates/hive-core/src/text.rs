//! Shared text primitives used across strategies, consensus, and
//! verification: normalization, tokenization, Jaccard similarity, and
//! point-list extraction.
//!
//! `spec.md` §9 notes the source mixes two similarity metrics (Jaccard on
//! whitespace tokens vs. a leading-token overlap heuristic); this crate
//! picks Jaccard as the single metric everywhere, per that Open Question's
//! resolution.

use std::collections::HashSet;

/// Lowercase and strip punctuation, collapsing whitespace — the
/// normalization every vote-comparison / majority-vote path uses before
/// grouping answers.
#[must_use]
pub fn normalize(answer: &str) -> String {
    let mut out = String::with_capacity(answer.len());
    let mut last_was_space = false;
    for ch in answer.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        } else if ch.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push(' ');
                last_was_space = true;
            }
        }
        // all other punctuation is dropped entirely
    }
    out.trim_end().to_owned()
}

/// Whitespace tokenization used for Jaccard comparisons.
#[must_use]
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Jaccard similarity of two token sets: `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets are defined as fully similar (1.0); one empty and one
/// non-empty set has similarity 0.0.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Jaccard similarity of two texts' first `n` whitespace tokens (used by
/// debate convergence checks, which only compare the opening of each
/// position).
#[must_use]
pub fn jaccard_prefix(a: &str, b: &str, n: usize) -> f64 {
    let ta: HashSet<String> = a.split_whitespace().take(n).map(str::to_lowercase).collect();
    let tb: HashSet<String> = b.split_whitespace().take(n).map(str::to_lowercase).collect();
    jaccard(&ta, &tb)
}

/// Mean pairwise Jaccard similarity across tokenized texts; `1.0` for
/// zero or one input (nothing to disagree with).
#[must_use]
pub fn mean_pairwise_jaccard(texts: &[String]) -> f64 {
    if texts.len() < 2 {
        return 1.0;
    }
    let tokens: Vec<HashSet<String>> = texts.iter().map(|t| tokenize(t)).collect();
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..tokens.len() {
        for j in (i + 1)..tokens.len() {
            total += jaccard(&tokens[i], &tokens[j]);
            pairs += 1;
        }
    }
    if pairs == 0 { 1.0 } else { total / pairs as f64 }
}

/// Severity bucket for a mean pairwise similarity score (`spec.md` §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictLevel {
    None,
    Minor,
    Moderate,
    Major,
}

/// Bucket a mean similarity score into a conflict severity.
#[must_use]
pub fn conflict_level(mean_similarity: f64) -> ConflictLevel {
    if mean_similarity >= 0.80 {
        ConflictLevel::None
    } else if mean_similarity >= 0.60 {
        ConflictLevel::Minor
    } else if mean_similarity >= 0.40 {
        ConflictLevel::Moderate
    } else {
        ConflictLevel::Major
    }
}

/// Extract bullet/numbered point-list items from free text (used for
/// `key_agreements` / `key_disagreements` extraction).
#[must_use]
pub fn extract_points(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let stripped = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
                .or_else(|| trimmed.strip_prefix("• "))
                .or_else(|| strip_numbered_prefix(trimmed));
            stripped.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
        })
        .collect()
}

/// Strip a "1. " / "12) " style numbered list prefix.
fn strip_numbered_prefix(line: &str) -> Option<&str> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rest = &line[digits_end..];
    rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
}

/// Scan text for the last occurrence of an explicit answer marker
/// ("final answer:", "therefore:", "thus:", "conclusion:"), falling back
/// to the last non-empty line. Used by `chain_of_thought` extraction.
#[must_use]
pub fn extract_final_answer(text: &str) -> String {
    const MARKERS: [&str; 4] = ["final answer:", "therefore:", "thus:", "conclusion:"];
    let lower = text.to_lowercase();

    let mut best: Option<(usize, usize)> = None; // (byte offset, marker len)
    for marker in MARKERS {
        if let Some(pos) = lower.rfind(marker) {
            match best {
                Some((best_pos, _)) if best_pos >= pos => {}
                _ => best = Some((pos, marker.len())),
            }
        }
    }

    if let Some((pos, marker_len)) = best {
        let after = &text[pos + marker_len..];
        let line = after.lines().next().unwrap_or(after).trim();
        if !line.is_empty() {
            return line.to_owned();
        }
    }

    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(text.trim())
        .to_owned()
}

/// Hedging/error keyword scan shared by reflection, step-verify, and the
/// cascade confidence heuristic.
#[must_use]
pub fn contains_issue_keywords(text: &str) -> bool {
    const KEYWORDS: [&str; 7] = [
        "incorrect",
        "wrong",
        "error",
        "mistake",
        "missing",
        "incomplete",
        "fails to",
    ];
    let lower = text.to_lowercase();
    KEYWORDS.iter().any(|k| lower.contains(k))
}
