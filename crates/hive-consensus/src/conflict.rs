//! Conflict detection (`spec.md` §4.5): pairwise Jaccard similarity of
//! tokenized responses, bucketed into a severity.

use hive_core::ModelResponse;
use hive_core::text::{ConflictLevel, conflict_level, mean_pairwise_jaccard};

/// Mean pairwise similarity of `responses`' content and its severity
/// bucket.
#[must_use]
pub fn detect_conflict(responses: &[ModelResponse]) -> (f64, ConflictLevel) {
    let texts: Vec<String> = responses.iter().map(|r| r.content.clone()).collect();
    let similarity = mean_pairwise_jaccard(&texts);
    (similarity, conflict_level(similarity))
}

#[cfg(test)]
mod tests {
    use hive_core::CorrelationId;

    use super::*;

    fn response(content: &str) -> ModelResponse {
        ModelResponse::new("m", content, 10, 10, 0.8, CorrelationId::generate())
    }

    #[test]
    fn identical_responses_are_no_conflict() {
        let responses = vec![response("the answer is 42"), response("the answer is 42")];
        let (_, level) = detect_conflict(&responses);
        assert_eq!(level, ConflictLevel::None);
    }

    #[test]
    fn disjoint_responses_are_major_conflict() {
        let responses = vec![response("cats and dogs"), response("rockets and planets")];
        let (_, level) = detect_conflict(&responses);
        assert_eq!(level, ConflictLevel::Major);
    }
}
