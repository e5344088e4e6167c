//! Strategy selection (`spec.md` §4.5): from task category, conflict
//! severity, and response count.

use hive_core::TaskCategory;
use hive_core::text::ConflictLevel;

use crate::types::ConsensusStrategy;

/// Evaluate the selection table top to bottom. A major conflict always
/// goes to `debate` regardless of category, ahead of the
/// category-specific rows below it; `weighted_merge` is the fallback for
/// exactly two responses with no stronger rule matching, and plain
/// `voting` is the final default (`spec.md` names no row for the
/// remaining residual: non-factual, non-creative, non-analytical,
/// not-major-conflict, count other than 2).
#[must_use]
pub fn select_strategy(category: TaskCategory, conflict: ConflictLevel, count: usize) -> ConsensusStrategy {
    if category == TaskCategory::Factual && conflict != ConflictLevel::Major && count >= 3 {
        return ConsensusStrategy::Voting;
    }
    if conflict == ConflictLevel::Major {
        return ConsensusStrategy::Debate;
    }
    if category == TaskCategory::Creative {
        return ConsensusStrategy::BestOf;
    }
    if category == TaskCategory::Analysis {
        return ConsensusStrategy::Synthesize;
    }
    if count == 2 {
        return ConsensusStrategy::WeightedMerge;
    }
    ConsensusStrategy::Voting
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factual_with_low_conflict_and_enough_votes_picks_voting() {
        let strategy = select_strategy(TaskCategory::Factual, ConflictLevel::Minor, 3);
        assert_eq!(strategy, ConsensusStrategy::Voting);
    }

    #[test]
    fn major_conflict_always_picks_debate() {
        let strategy = select_strategy(TaskCategory::Creative, ConflictLevel::Major, 5);
        assert_eq!(strategy, ConsensusStrategy::Debate);
    }

    #[test]
    fn creative_picks_best_of() {
        let strategy = select_strategy(TaskCategory::Creative, ConflictLevel::Minor, 5);
        assert_eq!(strategy, ConsensusStrategy::BestOf);
    }

    #[test]
    fn analysis_picks_synthesize() {
        let strategy = select_strategy(TaskCategory::Analysis, ConflictLevel::None, 4);
        assert_eq!(strategy, ConsensusStrategy::Synthesize);
    }

    #[test]
    fn two_responses_with_no_stronger_rule_picks_weighted_merge() {
        let strategy = select_strategy(TaskCategory::Conversation, ConflictLevel::Minor, 2);
        assert_eq!(strategy, ConsensusStrategy::WeightedMerge);
    }

    #[test]
    fn residual_case_defaults_to_voting() {
        let strategy = select_strategy(TaskCategory::Conversation, ConflictLevel::Minor, 4);
        assert_eq!(strategy, ConsensusStrategy::Voting);
    }
}
