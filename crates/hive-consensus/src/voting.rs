//! `voting` (`spec.md` §4.5): normalize, group, pick the
//! confidence-weighted plurality.

use std::collections::HashMap;

use hive_core::ModelResponse;
use hive_core::text::normalize;

/// Group responses by normalized answer, weighting each vote by its own
/// confidence; return the winning group's original-form answer and its
/// agreement rate (`winning_weight / total_weight`). Ties on weight are
/// broken by lexical order of the normalized form, so the result is
/// deterministic regardless of `HashMap`'s randomized iteration order.
#[must_use]
pub fn vote(responses: &[ModelResponse]) -> (String, f64) {
    assert!(!responses.is_empty(), "voting requires at least one response");

    let mut total_weight = 0.0;
    let mut groups: HashMap<String, (String, f64)> = HashMap::new();
    for response in responses {
        total_weight += response.raw_confidence;
        let key = normalize(&response.content);
        let entry = groups.entry(key).or_insert_with(|| (response.content.clone(), 0.0));
        entry.1 += response.raw_confidence;
    }

    let (_, answer, winning_weight) = groups
        .into_iter()
        .map(|(key, (answer, weight))| (key, answer, weight))
        .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(&b.0)))
        .expect("at least one response was grouped");

    let agreement_rate = if total_weight > 0.0 { winning_weight / total_weight } else { 0.0 };
    (answer, agreement_rate)
}
