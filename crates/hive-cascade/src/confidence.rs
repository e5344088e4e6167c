//! Heuristic response confidence estimation (`spec.md` §4.4).

const HEDGING_PHRASES: [&str; 12] = [
    "i'm not sure",
    "i don't know",
    "might be",
    "possibly",
    "could be wrong",
    "i think",
    "maybe",
    "uncertain",
    "i cannot",
    "i'm unable to",
    "beyond my",
    "i apologize",
];

/// Estimate confidence in `response` to `query`, 0.0 to 1.0
/// (`spec.md` §4.4 step 3).
#[must_use]
pub fn estimate_confidence(query: &str, response: &str) -> f64 {
    let mut confidence: f64 = 0.8;
    let lower = response.to_lowercase();

    let hedge_count = HEDGING_PHRASES.iter().filter(|phrase| lower.contains(*phrase)).count();
    confidence -= hedge_count as f64 * 0.1;

    if response.len() < 100 && query.len() > 200 {
        confidence -= 0.2;
    }

    if response.len() < 20 {
        confidence = 0.3;
    }

    if lower.contains("error") || lower.contains("failed") {
        confidence -= 0.3;
    }

    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confident_response_no_hedging() {
        let confidence = estimate_confidence("what is 6*7?", "The answer is 42. This is well-established.");
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn hedging_phrases_reduce_confidence() {
        let confidence = estimate_confidence("explain", "I'm not sure, but maybe it's this. I think so.");
        assert!((confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn short_response_to_long_query_penalized() {
        let long_query = "a".repeat(250);
        let short_response = "x".repeat(50);
        let confidence = estimate_confidence(&long_query, &short_response);
        assert!((confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn very_short_response_forces_low_confidence() {
        let confidence = estimate_confidence("a long enough query to matter", "Maybe.");
        assert!((confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn error_keyword_reduces_confidence() {
        let confidence = estimate_confidence("query", "The request failed with an error upstream.");
        assert!((confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn confidence_never_drops_below_zero() {
        let confidence = estimate_confidence(
            "q",
            "I'm not sure, I don't know, might be, possibly, could be wrong, error",
        );
        assert!((0.0..=1.0).contains(&confidence));
    }
}
