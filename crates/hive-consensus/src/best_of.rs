//! `best_of` (`spec.md` §4.5): score each response by heuristic quality,
//! return the highest.

use hive_core::ModelResponse;

use crate::scoring::quality_heuristic;

/// Return the highest-quality response's content and its score.
#[must_use]
pub fn best_of(responses: &[ModelResponse]) -> (String, f64) {
    assert!(!responses.is_empty(), "best_of requires at least one response");
    responses
        .iter()
        .map(|r| (r.content.clone(), quality_heuristic(&r.content)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .expect("at least one response was scored")
}

#[cfg(test)]
mod tests {
    use hive_core::CorrelationId;

    use super::*;

    fn response(content: &str) -> ModelResponse {
        ModelResponse::new("m", content, 10, 10, 0.8, CorrelationId::generate())
    }

    #[test]
    fn picks_the_best_structured_response() {
        let plain = response("ok");
        let structured = response(&("- a\n- b\n".to_owned() + &"x".repeat(120) + " This is certainly correct."));
        let (answer, score) = best_of(&[plain, structured]);
        assert!(answer.starts_with("- a"));
        assert!(score > 0.7);
    }
}
